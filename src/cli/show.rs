use super::{chart, ui};
use crate::core::QueryState;
use crate::core::currency_detail::CurrencyDetailPresenter;
use crate::core::rate::format_timestamp;
use comfy_table::Cell;

impl CurrencyDetailPresenter {
    pub fn display_as_page(&self) -> String {
        if self.code().is_empty() {
            return ui::style_text("Select a currency to see its history.", ui::StyleType::Subtle);
        }

        let title = match self.metadata() {
            Some(m) => format!("{} ({})", m.display_name, m.code),
            None => format!("Unknown currency ({})", self.code()),
        };
        let title_style = if self.is_unknown_currency() {
            ui::StyleType::Error
        } else {
            ui::StyleType::Title
        };
        let mut output = format!("{}\n\n", ui::style_text(&title, title_style));

        let latest = match self.latest() {
            QueryState::Loaded(rate) => format!(
                "{} {}",
                ui::style_text(
                    &format!("{:.4} {} per EUR", rate.obs_value, rate.currency),
                    ui::StyleType::Value
                ),
                ui::style_text(
                    &format!("({})", format_timestamp(&rate.timestamp)),
                    ui::StyleType::Subtle
                )
            ),
            QueryState::Failed(message) => ui::style_text(message, ui::StyleType::Error),
            QueryState::Idle | QueryState::Loading => String::new(),
        };
        output.push_str(&format!(
            "{} {}\n\n",
            ui::style_text("Latest rate:", ui::StyleType::Label),
            latest
        ));

        if let Some(message) = self.history().error_message() {
            output.push_str(&ui::style_text(message, ui::StyleType::Error));
            return output;
        }

        if let Some(series) = self.chart_series() {
            output.push_str(&chart::render_chart(&series));
            if !series.is_empty() {
                let mut table = ui::new_styled_table();
                table.set_header(vec![ui::header_cell("Date"), ui::header_cell("Rate")]);
                for (label, value) in series.points() {
                    table.add_row(vec![
                        Cell::new(format_timestamp(label)),
                        ui::number_cell(value, 4),
                    ]);
                }
                output.push_str("\n\n");
                output.push_str(&table.to_string());
            }
        }

        output
    }
}

/// Loads and prints the detail page of one currency.
pub async fn run(presenter: &mut CurrencyDetailPresenter, code: &str) {
    ui::with_spinner(
        &format!("Fetching {code} rates..."),
        presenter.activate(code),
    )
    .await;
    println!("{}", presenter.display_as_page());
}
