/// JSON-RPC 2.0 bridge to the embedding page. The host posts requests via
/// `window.postMessage`; notifications flow back through the parent window.
pub mod web_rpc;
