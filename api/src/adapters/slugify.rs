//! Default slug derivation
//!
//! Transliterates the title to ASCII, lowercases it and joins the words with
//! `-`, so "Заголовок" becomes "zagolovok". A title with nothing to
//! transliterate (only punctuation, say) yields an empty slug and the caller
//! reports it as a form error.

use crate::domain::ports::Slugifier;

#[derive(Debug, Default, Clone, Copy)]
pub struct TransliteratingSlugifier;

impl Slugifier for TransliteratingSlugifier {
    fn slugify(&self, text: &str) -> String {
        slug::slugify(text)
    }
}
