//! Interactive list, detail and calculator loop

use super::{convert, list, show, ui};
use crate::core::{Calculator, CurrencyDetailPresenter, NavigationIntent, RateListPresenter};
use anyhow::Result;
use console::Term;

/// Normalizes a typed currency code. Empty input means "leave".
pub fn parse_selection(input: &str) -> Option<String> {
    let code = input.trim().to_uppercase();
    (!code.is_empty()).then_some(code)
}

fn prompt(term: &Term, text: &str) -> Result<String> {
    term.write_str(&ui::style_text(text, ui::StyleType::Label))?;
    Ok(term.read_line()?)
}

pub async fn run(
    list_presenter: &mut RateListPresenter,
    detail_presenter: &mut CurrencyDetailPresenter,
    calculator: &mut Calculator,
) -> Result<()> {
    let term = Term::stdout();
    list::run(list_presenter).await;

    loop {
        let Some(code) = parse_selection(&prompt(&term, "\nCurrency code (empty to quit): ")?)
        else {
            return Ok(());
        };

        let NavigationIntent::ShowCurrency(code) = list_presenter.select_currency(&code);
        ui::print_separator();
        show::run(detail_presenter, &code).await;

        loop {
            let amount = prompt(&term, "\nAmount in EUR (empty to go back): ")?;
            if amount.trim().is_empty() {
                break;
            }
            convert::run(calculator, &amount, detail_presenter.code()).await;
        }

        ui::print_separator();
        println!("{}", list_presenter.display_as_table());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection(" usd \n"), Some("USD".to_string()));
        assert_eq!(parse_selection("GBP"), Some("GBP".to_string()));
        assert_eq!(parse_selection("   "), None);
        assert_eq!(parse_selection(""), None);
    }
}
