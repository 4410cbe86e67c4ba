//! Embeds the build-time UTC epoch so the firmware can keep wall time
//! without an RTC or a network time source.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() {
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());

    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_EPOCH: i64 = {};",
            chrono::Utc::now().timestamp()
        ))
        .unwrap();
}
