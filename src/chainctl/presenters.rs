//! # Presenters
//!
//! Separates what a chain looks like from how it is written out.
//!
//! [`ChainPresenter`] wraps a single chain and [`ChainPresenters`] an ordered
//! collection. Both implement [`TableRenderer`] through the shared
//! [`render_list`], which writes the header once and then one row per chain in the
//! order given.
//!
//! Columns: `ID`, `Enabled`, `Config`, `Created`, `Updated`. The config column is
//! the document pretty-printed with four-space indentation, so a row spans several
//! lines.

use crate::error::Result;
use crate::model::{ChainResource, ConfigDocument, ResourcePage};
use serde::Serialize;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

pub const HEADERS: [&str; 5] = ["ID", "Enabled", "Config", "Created", "Updated"];

const COLUMN_GAP: &str = "   ";
const INDENT: &[u8] = b"    ";

/// Anything that can be written out as a table.
pub trait TableRenderer {
    fn render_table(&self, w: &mut dyn Write) -> Result<()>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ChainPresenter {
    pub chain: ChainResource,
}

impl ChainPresenter {
    pub fn new(chain: ChainResource) -> Self {
        Self { chain }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.chain.id.clone(),
            self.chain.enabled.to_string(),
            pretty_config(&self.chain.config),
            self.chain.created_at.to_string(),
            self.chain.updated_at.to_string(),
        ]
    }
}

impl From<ChainResource> for ChainPresenter {
    fn from(chain: ChainResource) -> Self {
        Self::new(chain)
    }
}

impl TableRenderer for ChainPresenter {
    fn render_table(&self, w: &mut dyn Write) -> Result<()> {
        render_list(&HEADERS, &[self.to_row()], w)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChainPresenters(pub Vec<ChainPresenter>);

impl ChainPresenters {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ChainResource>> for ChainPresenters {
    fn from(chains: Vec<ChainResource>) -> Self {
        ChainPresenters(chains.into_iter().map(ChainPresenter::new).collect())
    }
}

impl From<&ResourcePage> for ChainPresenters {
    fn from(page: &ResourcePage) -> Self {
        page.resources.clone().into()
    }
}

impl TableRenderer for ChainPresenters {
    fn render_table(&self, w: &mut dyn Write) -> Result<()> {
        let rows: Vec<Vec<String>> = self.0.iter().map(ChainPresenter::to_row).collect();
        render_list(&HEADERS, &rows, w)
    }
}

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Renderer {
    #[default]
    Table,
    Json,
}

impl Renderer {
    pub fn render<T: TableRenderer + Serialize>(&self, value: &T, w: &mut dyn Write) -> Result<()> {
        match self {
            Renderer::Table => value.render_table(w),
            Renderer::Json => {
                serde_json::to_writer_pretty(&mut *w, value)?;
                writeln!(w)?;
                Ok(())
            }
        }
    }
}

// Config was decoded from JSON, so re-encoding it cannot fail.
fn pretty_config(config: &ConfigDocument) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    config
        .serialize(&mut ser)
        .expect("decoded config must re-encode as JSON");
    String::from_utf8(buf).expect("serde_json emits UTF-8")
}

/// Writes `headers` and `rows` as an aligned table.
///
/// Cells may span several lines; continuation lines leave the other columns
/// blank. Data rows are separated by an empty line.
pub fn render_list(headers: &[&str], rows: &[Vec<String>], w: &mut dyn Write) -> Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            let widest = cell.lines().map(|l| l.width()).max().unwrap_or(0);
            widths[i] = widths[i].max(widest);
        }
    }

    write_line(w, headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|n| "-".repeat(*n)).collect();
    write_line(w, &rule, &widths)?;

    for (r, row) in rows.iter().enumerate() {
        if r > 0 {
            writeln!(w)?;
        }
        let cells: Vec<Vec<&str>> = row.iter().map(|c| c.lines().collect()).collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for k in 0..height {
            let line: Vec<&str> = (0..widths.len())
                .map(|i| cells.get(i).and_then(|c| c.get(k)).copied().unwrap_or(""))
                .collect();
            write_line(w, &line, &widths)?;
        }
    }
    Ok(())
}

fn write_line<S: AsRef<str>>(w: &mut dyn Write, cells: &[S], widths: &[usize]) -> Result<()> {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(|c| c.as_ref()).unwrap_or("");
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    writeln!(w, "{}", line.trim_end())?;
    Ok(())
}
