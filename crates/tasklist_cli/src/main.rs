//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tasklist_core` linkage without the Flutter runtime.
//! - Exercise one in-memory session so the output stays deterministic.

use tasklist_core::{MemoryKeyValueStore, TaskListSession};

fn main() {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    match TaskListSession::open(MemoryKeyValueStore::new()) {
        Ok(mut session) => {
            let created = session.create("smoke check").is_some();
            session.flush();
            println!(
                "tasklist_core session=ok created={created} count={}",
                session.list().len()
            );
        }
        Err(err) => {
            eprintln!("tasklist_core session=error error={err}");
            std::process::exit(1);
        }
    }
}
