use crate::api::Product;

/// Yes/no prompt shown before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl ConfirmDialog {
    pub fn delete_product(product: &Product) -> Self {
        Self {
            title: "Delete product".to_string(),
            message: format!("Are you sure you want to delete \"{}\"?", product.name),
            confirm_text: "Delete".to_string(),
            cancel_text: "Cancel".to_string(),
        }
    }

    /// Prompt line, e.g. `Delete product: Are you sure ...? [Delete/Cancel]`.
    pub fn prompt(&self) -> String {
        format!(
            "{}: {} [{}/{}]",
            self.title, self.message, self.confirm_text, self.cancel_text
        )
    }

    /// Interpret a typed answer. Only an explicit yes or the confirm label confirms.
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.trim();
        answer.eq_ignore_ascii_case("y")
            || answer.eq_ignore_ascii_case("yes")
            || answer.eq_ignore_ascii_case(&self.confirm_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_dialog_names_the_product() {
        let product = Product {
            id: "p1".to_string(),
            name: "Lamp".to_string(),
            description: None,
            price: 1.0,
            category: "Home".to_string(),
            created_at: None,
            updated_at: None,
        };
        let dialog = ConfirmDialog::delete_product(&product);
        assert!(dialog.message.contains("\"Lamp\""));
        assert!(dialog.accepts("y"));
        assert!(dialog.accepts(" Delete "));
        assert!(!dialog.accepts(""));
        assert!(!dialog.accepts("n"));
        assert!(!dialog.accepts("Cancel"));
    }
}
