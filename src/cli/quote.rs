use clap::Args;
use happy_day_admin::domain::{OrderProduct, OrderQuote};
use happy_day_admin::system::AdminSystem;

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Product line as `ID:QUANTITY`; repeat for more lines
    #[arg(long = "product", required = true, value_parser = parse_line)]
    products: Vec<OrderProduct>,
}

pub(crate) async fn run(system: &AdminSystem, args: QuoteArgs) -> Result<(), String> {
    let quote = OrderQuote {
        products: args.products,
    };
    let total_price = system
        .orders
        .quote(&quote)
        .await
        .map_err(|error| format!("failed to quote order: {error}"))?;

    println!("total_price: {total_price:.2}");
    Ok(())
}

fn parse_line(value: &str) -> Result<OrderProduct, String> {
    let (id, quantity) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ID:QUANTITY, got `{value}`"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid quantity `{quantity}`: {error}"))?;
    if id.trim().is_empty() || quantity == 0 {
        return Err(format!("expected ID:QUANTITY with a positive quantity, got `{value}`"));
    }

    Ok(OrderProduct {
        id: id.trim().to_string(),
        quantity,
        ..OrderProduct::default()
    })
}
