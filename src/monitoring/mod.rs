/*!
 * Monitoring
 * Structured logging setup
 */

mod tracer;

pub use tracer::{generate_scan_id, init_tracing, scan_span};
