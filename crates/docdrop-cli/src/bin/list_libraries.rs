use anyhow::Result;
use clap::Parser;
use docdrop_core::UploadConfig;
use docdrop_store::create_store;
use docdrop_workflow::{resolve_libraries, FormHandle};

use docdrop_cli::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "list_libraries")]
#[command(about = "List the document libraries the current principal may upload into")]
struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let _args = Args::parse();
    let config = UploadConfig::load()?;
    let store = create_store(&config.store).await?;

    let handle = FormHandle::default();
    let libraries = resolve_libraries(store, &config.libraries, &handle).await;

    if libraries.is_empty() {
        println!("No selectable libraries (all candidates denied or unavailable).");
        return Ok(());
    }

    for library in &libraries {
        println!("{}\t{}", library.title, library.path);
    }
    println!(
        "{} of {} candidate(s) selectable",
        libraries.len(),
        config.libraries.len()
    );
    Ok(())
}
