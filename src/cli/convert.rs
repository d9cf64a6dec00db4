use super::ui;
use crate::exchange::RateStore;
use anyhow::{Result, bail};

pub fn format_conversion(amount: f64, from: &str, to: &str, converted: f64) -> String {
    format!("{amount} {from} = {converted} {to}")
}

pub async fn run(rate_store: &RateStore, amount: f64, from: &str, to: &str) -> Result<()> {
    let spinner = ui::new_spinner(&format!("Fetching exchange rates for {from}"));
    rate_store.fetch_rates(Some(from)).await;
    spinner.finish_and_clear();

    if let Some(message) = rate_store.error() {
        bail!("{message}");
    }

    match rate_store.convert_currency(amount, from, to) {
        Some(converted) => {
            println!(
                "{}",
                ui::style_text(
                    &format_conversion(amount, from, to, converted),
                    ui::StyleType::Value
                )
            );
            Ok(())
        }
        None => bail!("Conversion from {from} to {to} is unavailable"),
    }
}
