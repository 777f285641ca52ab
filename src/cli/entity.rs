use clap::Args;
use happy_day_admin::form::DeleteOutcome;
use happy_day_admin::system::AdminSystem;
use serde::Serialize;

use super::ResourceKind;

#[derive(Debug, Args)]
pub(crate) struct EntityArgs {
    #[arg(value_enum)]
    resource: ResourceKind,

    /// Entity id
    id: String,
}

pub(crate) async fn show(system: &AdminSystem, args: EntityArgs) -> Result<(), String> {
    let id = args.id.as_str();
    match args.resource {
        ResourceKind::Customers => print_json(system.customers.get_customer(id).await),
        ResourceKind::Products => print_json(system.products.get_product(id).await),
        ResourceKind::Discounts => print_json(system.discounts.get_discount(id).await),
        ResourceKind::Orders => print_json(system.orders.get_order(id).await),
    }
}

pub(crate) async fn delete(system: &AdminSystem, args: EntityArgs) -> Result<(), String> {
    let id = args.id.as_str();
    let outcome = match args.resource {
        ResourceKind::Customers => system.delete_customer(id).confirm().await,
        ResourceKind::Products => system.delete_product(id).confirm().await,
        ResourceKind::Discounts => system.delete_discount(id).confirm().await,
        ResourceKind::Orders => system.delete_order(id).confirm().await,
    };

    match outcome {
        DeleteOutcome::Deleted => {
            println!("deleted: {id}");
            Ok(())
        }
        DeleteOutcome::Failed(message) => Err(format!("failed to delete {id}: {message}")),
    }
}

fn print_json<T, E>(result: Result<T, E>) -> Result<(), String>
where
    T: Serialize,
    E: std::fmt::Display,
{
    let item = result.map_err(|error| format!("failed to load entity: {error}"))?;
    let json = serde_json::to_string_pretty(&item)
        .map_err(|error| format!("failed to encode entity: {error}"))?;
    println!("{json}");
    Ok(())
}
