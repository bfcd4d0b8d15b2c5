pub mod netease;

pub use netease::NeteaseClient;
