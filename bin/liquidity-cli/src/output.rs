use std::fmt::Write;

use liquidity_config_lib::OutputFormat;
use liquidity_lib::LiquidityDistribution;

pub fn print_distribution(
    distribution: &LiquidityDistribution,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(distribution)?),
        OutputFormat::Table => print!("{}", render_table(distribution)?),
    }
    Ok(())
}

/// Ticks above the current tick are marked with a trailing `+`.
pub fn render_table(distribution: &LiquidityDistribution) -> Result<String, std::fmt::Error> {
    let mut table = String::new();
    writeln!(table, "{:>8} {:>44} {:>40}", "tick", "price", "liquidity")?;
    for datapoint in &distribution.datapoints {
        let marker = if datapoint.tick_index <= distribution.current_tick_index {
            ' '
        } else {
            '+'
        };
        writeln!(
            table,
            "{:>8} {:>44} {:>40}{}",
            datapoint.tick_index,
            datapoint.price.to_string(),
            datapoint.liquidity.to_string(),
            marker
        )?;
    }
    writeln!(
        table,
        "current tick {} price {} liquidity {}",
        distribution.current_tick_index, distribution.current_price, distribution.current_liquidity
    )?;
    Ok(table)
}
