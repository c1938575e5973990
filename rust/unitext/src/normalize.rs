use unitext_unicode::normalization::{self, NormalizationForm};

use crate::text::UnicodeText;

impl UnicodeText {
    /// Converts the text in place to `form`. Text that already passes the
    /// normalization quick check is left untouched, so normalizing twice is a no-op.
    pub fn normalize(&mut self, form: NormalizationForm) {
        let s = self.to_std_string();
        if normalization::is_normalized(&s, form) {
            return;
        }
        let normalized = normalization::normalize(&s, form);
        self.set_units(normalized.encode_utf16().collect());
    }

    /// Returns a normalized copy of the text.
    pub fn normalized(&self, form: NormalizationForm) -> UnicodeText {
        let mut text = self.clone();
        text.normalize(form);
        text
    }

    pub fn is_normalized(&self, form: NormalizationForm) -> bool {
        normalization::is_normalized(&self.to_std_string(), form)
    }
}
