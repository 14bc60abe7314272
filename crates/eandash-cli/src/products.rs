//! Catalog inspection commands.

use clap::Subcommand;

use eandash_core::{AppConfig, ProductStatus};
use eandash_db::{ProductFilters, ProductSort};

use crate::gateways;

#[derive(Subcommand)]
pub enum ProductCommand {
    /// List catalog products
    List {
        /// Substring match against title and EAN code
        #[arg(long)]
        search: Option<String>,
        /// Filter by status: pending, active or inactive
        #[arg(long)]
        status: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Sort column: title, price, ean_code, status, created_at, updated_at
        #[arg(long, default_value = "created_at")]
        sort: String,
        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Rows per page
        #[arg(long, default_value_t = ProductFilters::DEFAULT_LIMIT)]
        limit: i64,
    },
    /// Show one product in full
    Show {
        /// Internal id
        id: Option<i64>,
        /// Look up by EAN code instead of id
        #[arg(long, conflicts_with = "id")]
        ean: Option<String>,
    },
    /// Delete a product by its internal id
    Delete { id: i64 },
}

fn print_product(row: &eandash_db::ProductRow) {
    println!("id:           {}", row.id);
    println!("ean_code:     {}", row.ean_code);
    println!("title:        {}", row.title);
    println!("description:  {}", row.description);
    println!("status:       {}", row.status);
    println!("price:        {}", row.price);
    if let Some(asin) = &row.asin {
        println!("asin:         {asin}");
    }
    if let Some(brand) = &row.brand {
        println!("brand:        {brand}");
    }
    if let Some(category) = &row.category {
        println!("category:     {category}");
    }
    if let Some(rank) = row.sales_rank {
        println!("sales_rank:   {rank}");
    }
    if !row.images.is_empty() {
        println!("images:       {}", row.images.join(", "));
    }
    println!("created_at:   {}", row.created_at);
    println!("updated_at:   {}", row.updated_at);
}

pub async fn run(config: &AppConfig, command: ProductCommand) -> anyhow::Result<()> {
    let pool = gateways::connect(config).await?;

    match command {
        ProductCommand::List {
            search,
            status,
            category,
            sort,
            ascending,
            page,
            limit,
        } => {
            let status = status
                .as_deref()
                .map(str::parse::<ProductStatus>)
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let sort = sort.parse::<ProductSort>().map_err(|e| anyhow::anyhow!(e))?;

            let filters = ProductFilters {
                search: search.as_deref(),
                status,
                category: category.as_deref(),
                sort,
                ascending,
                page,
                limit,
            };
            let result = eandash_db::list_products(&pool, &filters).await?;

            println!(
                "{:>6}  {:<13}  {:<8}  {:>10}  {}",
                "id", "ean", "status", "price", "title"
            );
            for row in &result.rows {
                println!(
                    "{:>6}  {:<13}  {:<8}  {:>10}  {}",
                    row.id, row.ean_code, row.status, row.price, row.title
                );
            }
            println!(
                "page {} of {} ({} products)",
                result.page, result.total_pages, result.total
            );
        }
        ProductCommand::Show { id, ean } => match (id, ean) {
            (Some(id), _) => {
                let row = eandash_db::get_product(&pool, id)
                    .await
                    .map_err(|error| anyhow::anyhow!("product {id}: {error}"))?;
                print_product(&row);
            }
            (None, Some(ean)) => match eandash_db::get_product_by_ean(&pool, &ean).await? {
                Some(row) => print_product(&row),
                None => println!("no product with EAN code {ean}"),
            },
            (None, None) => anyhow::bail!("provide an id or --ean"),
        },
        ProductCommand::Delete { id } => {
            eandash_db::delete_product(&pool, id)
                .await
                .map_err(|error| anyhow::anyhow!("failed to delete product {id}: {error}"))?;
            println!("deleted product {id}");
        }
    }

    Ok(())
}
