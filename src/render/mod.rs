//! Rendering module: output sinks, diagram rendering, and build statistics.

mod diagram;
mod json;
mod options;
mod result;
mod sink;
mod text;

pub use diagram::{render_directory, DiagramRenderer, GraphvizRenderer};
pub use json::{to_json, JsonFormat, JsonSink};
pub use options::{OutputFormat, SinkOptions};
pub use result::BuildStats;
pub use sink::{emit, persist_atomically, MemorySink, OutputSink};
pub use text::{to_text, TextSink};
