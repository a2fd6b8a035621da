use super::ui;
use crate::core::QueryState;
use crate::core::rate::format_timestamp;
use crate::core::rate_list::RateListPresenter;
use comfy_table::Cell;

impl RateListPresenter {
    pub fn display_as_table(&self) -> String {
        match self.state() {
            QueryState::Idle | QueryState::Loading => String::new(),
            QueryState::Failed(message) => ui::style_text(message, ui::StyleType::Error),
            QueryState::Loaded(rates) if rates.is_empty() => {
                ui::style_text("No exchange rates available.", ui::StyleType::Subtle)
            }
            QueryState::Loaded(_) => {
                let mut table = ui::new_styled_table();
                table.set_header(vec![
                    ui::header_cell("Code"),
                    ui::header_cell("Currency"),
                    ui::header_cell("Symbol"),
                    ui::header_cell("Rate (per EUR)"),
                ]);

                for row in self.rows() {
                    let name = row
                        .metadata
                        .map_or_else(ui::na_cell, |m| Cell::new(&m.display_name));
                    let symbol = ui::format_optional_cell(
                        row.metadata.and_then(|m| m.symbol.as_deref()),
                        str::to_string,
                    );
                    table.add_row(vec![
                        Cell::new(&row.rate.currency),
                        name,
                        symbol,
                        ui::number_cell(row.rate.obs_value, 4),
                    ]);
                }

                let mut output = String::new();
                if let Some(as_of) = self.as_of() {
                    output.push_str(&format!(
                        "Exchange rates as of {}\n\n",
                        ui::style_text(&format_timestamp(&as_of), ui::StyleType::Title)
                    ));
                }
                output.push_str(&table.to_string());
                output
            }
        }
    }
}

/// Loads the latest rates and prints them.
pub async fn run(presenter: &mut RateListPresenter) {
    ui::with_spinner("Fetching exchange rates...", presenter.activate()).await;
    println!("{}", presenter.display_as_table());
}
