//! Result persistence and human-readable formatting.

use std::fs;
use std::io;
use std::path::Path;

use crate::worker::VanityResult;

/// Default file the winning keypair is written to.
pub const DEFAULT_OUTPUT_FILE: &str = "vanity-address.txt";

/// Renders the result record as stored on disk.
pub fn render_result(result: &VanityResult) -> String {
    format!(
        "Address: {}\nPrivate Key: {}",
        result.address, result.private_key
    )
}

/// Writes the winning address and private key to `path`, replacing any
/// existing file.
pub fn write_result(path: impl AsRef<Path>, result: &VanityResult) -> io::Result<()> {
    fs::write(path, render_result(result))
}

/// Formats a count with a K/M/B suffix.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VanityResult {
        VanityResult {
            private_key: format!("{}01", "0".repeat(62)),
            address: "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".into(),
            attempts: 1,
            worker_id: 0,
        }
    }

    #[test]
    fn test_write_result() {
        let path = std::env::temp_dir().join(format!("vanity-result-{}.txt", std::process::id()));
        write_result(&path, &sample()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            contents,
            "Address: 0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf\n\
             Private Key: 0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(50_000), "50.00K");
        assert_eq!(format_number(2_500_000), "2.50M");
        assert_eq!(format_number(5_000_000_000), "5.00B");
    }
}
