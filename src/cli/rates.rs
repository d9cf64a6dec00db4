use super::ui;
use crate::core::{CurrencyRate, RateSnapshot};
use crate::exchange::RateStore;
use crate::selection::SelectionStore;
use anyhow::{Result, bail};
use comfy_table::Cell;

/// Renders the selected currencies against the snapshot's base.
pub fn display_rates_table(
    snapshot: &RateSnapshot,
    selected: &[String],
    rates: &[CurrencyRate],
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (1 {})", snapshot.base_code)),
    ]);

    for code in selected {
        let rate_cell = rates
            .iter()
            .find(|r| &r.code == code)
            .map_or_else(ui::na_cell, |r| ui::number_cell(r.rate));
        table.add_row(vec![Cell::new(code), rate_cell]);
    }

    table.to_string()
}

fn display_update_times(snapshot: &RateSnapshot) -> String {
    let format_time = |time: Option<chrono::DateTime<chrono::Utc>>| {
        time.map_or_else(
            || "N/A".to_string(),
            |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
    };
    format!(
        "Last updated: {}  Next update: {}",
        format_time(snapshot.last_updated()),
        format_time(snapshot.next_update())
    )
}

pub async fn run(rate_store: &RateStore, selection: &SelectionStore, base: &str) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Fetching exchange rates for {base}"));
    rate_store.fetch_rates(Some(base)).await;
    spinner.finish_and_clear();

    if let Some(message) = rate_store.error() {
        bail!("{message}");
    }
    let Some(snapshot) = rate_store.snapshot() else {
        bail!("No exchange rates available for {base}");
    };

    println!(
        "{}",
        ui::style_text(
            &format!("Exchange rates for {}", snapshot.base_code),
            ui::StyleType::Title
        )
    );

    if selection.codes().is_empty() {
        println!(
            "{}",
            ui::style_text(
                "No currencies selected. Add some with `fxwatch select add EUR`.",
                ui::StyleType::Subtle
            )
        );
    } else {
        let rates = rate_store.currency_rates(&snapshot.base_code, selection.codes());
        println!("{}", display_rates_table(&snapshot, selection.codes(), &rates));
    }

    println!(
        "{}",
        ui::style_text(&display_update_times(&snapshot), ui::StyleType::Subtle)
    );
    Ok(())
}
