use resx_translator::{Document, LanguageCatalog, WritingDirection, extract::translatable_records};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TRUNCATE_WIDTH: usize = 50;

/// Print the headers and data records of a parsed resx document.
pub fn print_view(document: &Document, full: bool) {
    let headers: Vec<_> = document.headers().collect();
    let records: Vec<_> = document.records().collect();
    let translatable = translatable_records(document).count();

    println!("=== Headers ===");
    if headers.is_empty() {
        println!("  (none)");
    }
    for header in &headers {
        println!("  {}: {}", header.name, header.value.trim());
    }

    println!("\n=== Data ===");
    println!(
        "Records: {} ({} translatable)",
        records.len(),
        translatable
    );

    for (i, (_, record)) in records.iter().enumerate() {
        match &record.name {
            Some(name) => println!("\n  Record {}: {}", i + 1, name),
            None => println!("\n  Record {}: <unnamed, skipped>", i + 1),
        }
        if record.preserve_whitespace {
            println!("    Whitespace: preserve");
        }
        if let Some(type_name) = &record.type_name {
            println!("    Type: {}", type_name);
        }
        if let Some(comment) = &record.comment {
            println!("    Comment: {}", comment);
        }
        if full {
            println!("    Value: {}", record.value);
        } else {
            println!("    Value: {}", truncate(&record.value, TRUNCATE_WIDTH));
        }
    }
}

/// Print the language catalog as an aligned table or as JSON.
pub fn print_languages(catalog: &LanguageCatalog, json_output: bool) -> Result<(), String> {
    if json_output {
        let languages: Vec<_> = catalog.iter().collect();
        let body = serde_json::to_string_pretty(&languages)
            .map_err(|e| format!("Cannot serialize languages: {}", e))?;
        println!("{}", body);
        return Ok(());
    }

    let code_width = column_width(catalog.iter().map(|l| l.code.as_str()), "Code");
    let name_width = column_width(catalog.iter().map(|l| l.name.as_str()), "Name");
    let native_width = column_width(catalog.iter().map(|l| l.native_name.as_str()), "Native");

    println!(
        "{}  {}  {}  Dir",
        pad("Code", code_width),
        pad("Name", name_width),
        pad("Native", native_width)
    );
    for language in catalog.iter() {
        let dir = match language.direction {
            WritingDirection::Ltr => "ltr",
            WritingDirection::Rtl => "rtl",
        };
        println!(
            "{}  {}  {}  {}",
            pad(&language.code, code_width),
            pad(&language.name, name_width),
            pad(&language.native_name, native_width),
            dir
        );
    }
    println!("\n{} language(s)", catalog.len());
    Ok(())
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, title: &str) -> usize {
    values.map(UnicodeWidthStr::width).fold(title.width(), usize::max)
}

/// Pads by display width, so CJK and combining text line up.
fn pad(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(value.width());
    format!("{}{}", value, " ".repeat(fill))
}

/// Cuts `value` to at most `width` display columns, appending `...` when cut.
pub fn truncate(value: &str, width: usize) -> String {
    if value.width() <= width {
        return value.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in value.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
