use clap::Parser;
use critical_maintainers::Args;
use maintainers::api::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    let index = critical_maintainers::find_critical_maintainers(args).await?;

    for (identity, count) in index.into_ranked() {
        println!("{:03}\t{}", count, identity);
    }

    Ok(())
}
