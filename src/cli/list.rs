use std::str::FromStr;

use clap::Args;
use happy_day_admin::domain::{PageRequest, Sort};
use happy_day_admin::list::ListClient;
use happy_day_admin::resource::Resource;
use happy_day_admin::resources::UnknownColumn;
use happy_day_admin::system::AdminSystem;
use serde::Serialize;

use super::ResourceKind;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    #[arg(value_enum)]
    resource: ResourceKind,

    /// Column to filter on, e.g. `name` or `customerPhone`
    #[arg(long, requires = "value")]
    field: Option<String>,

    /// Text the filter column must contain
    #[arg(long, requires = "field")]
    value: Option<String>,

    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Rows per page; defaults to the configured page size
    #[arg(long)]
    size: Option<u32>,

    /// Column to sort on, e.g. `id` or `deliveryAt`
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
}

pub(crate) async fn run(system: &AdminSystem, args: ListArgs) -> Result<(), String> {
    match args.resource {
        ResourceKind::Customers => print_page(&system.customer_list, &args).await,
        ResourceKind::Products => print_page(&system.product_list, &args).await,
        ResourceKind::Discounts => print_page(&system.discount_list, &args).await,
        ResourceKind::Orders => print_page(&system.order_list, &args).await,
    }
}

async fn print_page<R, V>(list: &ListClient<R, V>, args: &ListArgs) -> Result<(), String>
where
    R: Resource,
    R::Filter: FromStr<Err = UnknownColumn>,
    R::Sort: FromStr<Err = UnknownColumn>,
    V: Serialize + Clone,
{
    if let Some(column) = &args.sort {
        let key = column.parse::<R::Sort>().map_err(|error| error.to_string())?;
        let sort = if args.desc { Sort::desc(key) } else { Sort::asc(key) };
        list.set_sort(Some(sort))
            .await
            .map_err(|error| format!("failed to sort {}: {error}", R::NAME))?;
    }

    if let (Some(column), Some(value)) = (&args.field, &args.value) {
        let field = column.parse::<R::Filter>().map_err(|error| error.to_string())?;
        list.set_filter(field, value.clone())
            .await
            .map_err(|error| format!("failed to filter {}: {error}", R::NAME))?;
    }

    // Moving the page fetches at once with the pending filter and sort.
    let size = args.size.unwrap_or(list.state().page.size);
    let seq = list
        .set_page(PageRequest::new(args.page, size))
        .await
        .map_err(|error| format!("failed to list {}: {error}", R::NAME))?;
    let state = list
        .wait_for(seq)
        .await
        .map_err(|error| format!("failed to list {}: {error}", R::NAME))?;

    if let Some(notice) = state.notice {
        return Err(notice.message);
    }

    for row in &state.rows {
        let line = serde_json::to_string(row)
            .map_err(|error| format!("failed to encode row: {error}"))?;
        println!("{line}");
    }
    eprintln!(
        "page {} of {} ({} items)",
        state.page.index + 1,
        state.total_pages.max(1),
        state.total_items
    );

    Ok(())
}
