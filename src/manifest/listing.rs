use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::io::{BackpressuredWriter, LineSink};

use super::structures::{Catalog, FileRecord};

/// Output layout for [`write_listing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    /// `name [tag1, tag2]`
    #[default]
    Plain,
    /// `;`-separated `name;hash;size;tags` with a header row
    Csv,
}

/// Selects files by tag membership
#[derive(Debug, Clone, Default)]
pub enum TagFilter {
    /// Every file, tagged or not
    #[default]
    Any,
    /// Files carrying at least one of these tags
    Tags(HashSet<String>),
}

impl TagFilter {
    pub fn only<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Tags(tags.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, file: &FileRecord) -> bool {
        match self {
            TagFilter::Any => true,
            TagFilter::Tags(enabled) => file.tags.iter().any(|t| enabled.contains(t)),
        }
    }
}

const CSV_HEADER: &str = "name;hash;size;tags";

/// Render one file in the given format.
pub fn format_entry(file: &FileRecord, format: ListFormat) -> String {
    match format {
        ListFormat::Plain => format!("{} [{}]", file.name, file.tags.join(", ")),
        ListFormat::Csv => [
            escape_csv_field(&file.name),
            escape_csv_field(&file.content_hash),
            file.size.to_string(),
            escape_csv_field(&file.tags.join(",")),
        ]
        .join(";"),
    }
}

/// Quote a CSV field containing `;`, `"` or a newline, doubling quotes.
pub fn escape_csv_field(value: &str) -> String {
    if value.contains([';', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Stream the files selected by `filter` through `writer`.
///
/// Returns the number of files written. The writer is left open.
pub async fn write_listing<S: LineSink>(
    catalog: &Catalog,
    filter: &TagFilter,
    format: ListFormat,
    writer: &mut BackpressuredWriter<S>,
) -> Result<usize> {
    if format == ListFormat::Csv {
        writer.write_line(CSV_HEADER).await?;
    }

    let mut count = 0;
    for file in catalog.files().iter().filter(|f| filter.matches(f)) {
        writer.write_line(format_entry(file, format)).await?;
        count += 1;
    }

    debug!("listed {} of {} files", count, catalog.files().len());
    Ok(count)
}
