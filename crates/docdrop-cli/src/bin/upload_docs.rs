use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use bytes::Bytes;
use clap::Parser;
use docdrop_core::models::{ActivityLevel, PendingFile};
use docdrop_core::UploadConfig;
use docdrop_store::create_store;
use docdrop_workflow::{bootstrap_form, Uploader};

use docdrop_cli::{content_type_for, init_tracing, parse_field_value};

#[derive(Parser, Debug)]
#[command(name = "upload_docs")]
#[command(about = "Upload files to a document library and apply metadata")]
struct Args {
    /// Target library title; must be one the current principal may add to
    #[arg(long)]
    library: String,

    /// Field value as INTERNAL_NAME=VALUE (repeat per field)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Files to upload
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = UploadConfig::load()?;
    let store = create_store(&config.store).await?;
    let handle = bootstrap_form(Arc::clone(&store), &config).await?;

    handle.update(|state| state.select_library(&args.library))?;

    let mut pending = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Invalid file path: {}", path.display()))?;
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        pending.push(PendingFile::new(
            name,
            content_type_for(name),
            Bytes::from(data),
        ));
    }

    let fields = handle.snapshot().fields;
    for pair in &args.set {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid --set {}, expected NAME=VALUE", pair))?;
        let field = fields
            .iter()
            .find(|f| f.internal_name() == name)
            .ok_or_else(|| anyhow!("Unknown field: {}", name))?;
        let value = parse_field_value(&field.schema.kind, raw)?;
        handle.update(|state| state.set_field_value(name, value))?;
    }

    handle.update(|state| state.set_files(pending))?;

    let state = handle.snapshot();
    if !state.is_complete() {
        bail!("Form incomplete: every configured field needs a value, the library must be selectable, and at least one file is required");
    }
    let Some(library) = state.selected_library.clone() else {
        bail!("No library selected");
    };

    let uploader = Uploader::new(store);
    uploader.submit(&handle, &library, state.pending).await;

    let settled = handle.snapshot();
    println!("Activity log:");
    for entry in &settled.log {
        let marker = match entry.level {
            ActivityLevel::Success => "ok ",
            ActivityLevel::Error => "err",
        };
        println!("  [{}] {}", marker, entry.message);
    }

    let failed = settled
        .pending
        .iter()
        .filter(|f| f.outcome == Some(false))
        .count();
    let succeeded = settled.pending.len() - failed;
    println!("{} file(s) uploaded, {} failed", succeeded, failed);

    if failed > 0 {
        bail!("{} file(s) failed", failed);
    }
    Ok(())
}
