use anyhow::{bail, Context, Result};
use infiltra_lib::init_logging;
use infiltra_lib::models::{DisguiseMode, PageStyle, RenderedBlock};
use infiltra_lib::services::render::StyleContext;
use infiltra_lib::services::session::ReaderSession;
use std::path::Path;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn describe_block(block: &RenderedBlock) -> String {
    match block {
        RenderedBlock::Heading { text } => format!("[heading] {}", preview(text, 40)),
        RenderedBlock::Body { text } => format!("[body]    {}", preview(text, 40)),
        RenderedBlock::CodeLine { line_number, text } => {
            format!("{:>4} | {}", line_number, preview(text, 40))
        }
        RenderedBlock::HeaderRow { cells } => format!("[header]  {}", cells.join(" | ")),
        RenderedBlock::DataRow { row_number, text } => {
            format!("{:>4} | {}", row_number, preview(text, 40))
        }
        RenderedBlock::Placeholder { message } => format!("[empty]   {}", message),
    }
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin disguise_txt -- <path.txt> [--mode auto|code|excel|document] [--chapter <n>] [--font <family>] [--list] [--blocks <n>] [--out <json_path>]\n\nNotes:\n  - `--list` prints the detected chapter table and exits.\n  - `--out` writes the rendered block tree as JSON."
        );
        return Ok(());
    }

    let path = args[1].clone();
    match Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("txt") => {}
        Some("epub") => bail!("EPUB input needs a dedicated parser; convert to .txt first"),
        _ => bail!("only .txt input is supported"),
    }

    let mode = DisguiseMode::from_str(&parse_arg_value(&args, "--mode").unwrap_or_default());
    let chapter: usize = parse_arg_value(&args, "--chapter")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let font = parse_arg_value(&args, "--font").unwrap_or_else(|| "auto".to_string());
    let blocks_n: usize = parse_arg_value(&args, "--blocks")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let out_path = parse_arg_value(&args, "--out");

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path))?;
    let title = Path::new(&path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "untitled".to_string());

    let session = ReaderSession::import(title, content);

    println!("File: {}", path);
    println!(
        "Loaded: {} chars ({} bytes)",
        session.novel().content.chars().count(),
        session.novel().content.len()
    );
    println!("Chapters: {}", session.chapter_count());

    if has_flag(&args, "--list") {
        for (index, span) in session.chapters().iter().enumerate() {
            println!(
                "{:>4}  {} ({} bytes)",
                index,
                preview(&span.title, 40),
                span.len()
            );
        }
        return Ok(());
    }

    let style = StyleContext::new(font, PageStyle::default());
    let view = session.view_chapter(chapter, mode, &style)?;

    println!("Mode: {}", mode.as_str());
    println!("Chapter {}: {}", view.index, preview(&view.title, 60));
    println!("Blocks: {}", view.output.blocks.len());
    for block in view.output.blocks.iter().take(blocks_n) {
        println!("  {}", describe_block(block));
    }
    if view.output.blocks.len() > blocks_n {
        println!("  ... ({} more)", view.output.blocks.len() - blocks_n);
    }

    if let Some(out_path) = out_path {
        let json = serde_json::to_string_pretty(&view.output)?;
        std::fs::write(&out_path, json)
            .with_context(|| format!("failed to write {}", out_path))?;
        println!("Wrote rendered output to {}", out_path);
    }

    Ok(())
}
