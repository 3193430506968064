#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const HEADER: &str = "command, caller, product, name, stock, token, amount, account, symbol";

pub const OWNER: &str = "0x0000000000000000000000000000000000000a11";
pub const SHOP: &str = "0x00000000000000000000000000000000000005e0";
pub const BUYER: &str = "0x000000000000000000000000000000000000000b";
pub const TOKEN1: &str = "0x0000000000000000000000000000000000000001";
pub const TOKEN2: &str = "0x0000000000000000000000000000000000000002";

/// Writes a command file with the standard header followed by `rows`.
pub fn write_commands(rows: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// The setup shared by the purchase scenarios: two buyer-owned tokens and
/// product 0 ("oreo", 100 in stock) priced at 150 TOKEN1 / 350 TOKEN2.
pub fn shop_setup_rows() -> Vec<String> {
    vec![
        format!("deploy_token, {BUYER}, , Shop Token One, , {TOKEN1}, 10000, , ST1"),
        format!("deploy_token, {BUYER}, , Shop Token Two, , {TOKEN2}, 20000, , ST2"),
        format!("add_product, {OWNER}, 0, oreo, 100"),
        format!("set_price, {OWNER}, 0, , , {TOKEN1}, 150"),
        format!("set_price, {OWNER}, 0, , , {TOKEN2}, 350"),
    ]
}

/// Generates a seeded random mix of approvals and purchases on top of the shop setup.
///
/// Returns how many of the generated purchases are covered by an approval of the
/// exact price, i.e. how many must succeed while stock lasts.
pub fn generate_purchase_csv(path: &Path, seed: u64, rows: usize) -> Result<usize, Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut file = File::create(path)?;
    writeln!(file, "{HEADER}")?;
    for row in shop_setup_rows() {
        writeln!(file, "{row}")?;
    }

    let mut approved = 0;
    for _ in 0..rows {
        if rng.gen_bool(0.5) {
            writeln!(file, "approve, {BUYER}, , , , {TOKEN1}, 150")?;
            writeln!(file, "buy, {BUYER}, 0, , , {TOKEN1}, 150")?;
            approved += 1;
        } else {
            let wrong_price = rng.gen_range(1..150);
            writeln!(file, "buy, {BUYER}, 0, , , {TOKEN1}, {wrong_price}")?;
        }
    }
    file.flush()?;
    Ok(approved)
}
