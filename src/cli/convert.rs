use super::ui;
use crate::core::calculator::Calculator;

impl Calculator {
    /// Last result or error; empty while nothing has been converted.
    pub fn display_result(&self) -> String {
        if let Some(message) = self.error_message() {
            return ui::style_text(message, ui::StyleType::Error);
        }
        let (Some(value), Some(currency)) = (self.result(), self.result_currency()) else {
            return String::new();
        };
        format!(
            "{} {}",
            ui::style_text("Result:", ui::StyleType::Label),
            ui::style_text(&format!("{value} {currency}"), ui::StyleType::Value)
        )
    }
}

/// Converts `amount` EUR into `currency` and prints the calculator state.
pub async fn run(calculator: &mut Calculator, amount: &str, currency: &str) {
    ui::with_spinner("Converting...", calculator.calculate(amount, currency)).await;
    let output = calculator.display_result();
    if !output.is_empty() {
        println!("{output}");
    }
}
