// Infrastructure layer: adapters, file I/O, serde, eventing
pub mod edge_list_reader;
pub mod event_ndjson;
pub mod scc_kosaraju;
pub mod serde_json_adapter;
