pub mod async_writer;

pub use async_writer::spawn_jsonl_writer;
