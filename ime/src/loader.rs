//! Textual dictionary ingestion and emission.
//!
//! One entry per line: `<chinese> <freq> <pinyin>`, fields separated by runs
//! of spaces or tabs. A leading UTF-8 BOM and trailing `\r` are tolerated;
//! blank lines are skipped and malformed lines are logged and dropped
//! rather than aborting the load. Extra trailing fields are ignored.
//!
//! Pinyin is normalized to lowercase here; anything outside `a-z` and `'`
//! is rejected at this boundary, since the core trusts its callers to feed
//! the tries lowercase letters only.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::session::Ime;

/// Parse one dictionary line into `(chinese, freq, pinyin)`.
pub fn parse_line(line: &str) -> Option<(String, u32, String)> {
    let mut fields = line.split([' ', '\t']).filter(|f| !f.is_empty());
    let chinese = fields.next()?;
    let freq: u32 = fields.next()?.parse().ok()?;
    let pinyin = fields.next()?.to_ascii_lowercase();
    if !pinyin
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b == b'\'')
    {
        return None;
    }
    Some((chinese.to_string(), freq, pinyin))
}

/// Load entries from a reader into the session's lexicon.
/// Returns the number of entries accepted (duplicates included).
pub fn load<R: BufRead>(ime: &mut Ime, reader: R) -> io::Result<usize> {
    let mut count = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let mut line = line.as_str();
        if number == 0 {
            line = line.strip_prefix('\u{feff}').unwrap_or(line);
        }
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((chinese, freq, pinyin)) => match ime.add_entry(chinese, pinyin, freq) {
                Ok(_) => count += 1,
                Err(err) => warn!(line = number + 1, %err, "rejected dictionary entry"),
            },
            None => warn!(line = number + 1, "malformed dictionary line"),
        }
    }
    Ok(count)
}

/// Load a dictionary file; see [`load`].
pub fn load_path<P: AsRef<Path>>(ime: &mut Ime, path: P) -> io::Result<usize> {
    load(ime, BufReader::new(File::open(path)?))
}

/// Write every entry in traversal order, one line each.
pub fn save<W: Write>(ime: &Ime, mut writer: W) -> io::Result<()> {
    for (chinese, pinyin, freq) in ime.iter_entries() {
        writeln!(writer, "{} {} {}", chinese, freq, pinyin)?;
    }
    Ok(())
}

/// Write the dictionary to a file; see [`save`].
pub fn save_path<P: AsRef<Path>>(ime: &Ime, path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save(ime, &mut writer)?;
    writer.flush()
}
