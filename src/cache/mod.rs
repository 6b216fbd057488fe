//! Cache LRU limitado.
//!
//! Este módulo implementa um cache Least Recently Used (LRU) de
//! capacidade fixa: quando a capacidade é excedida, a entrada menos
//! recentemente usada é descartada. Inclui uma variante com expiração
//! por TTL ([`TimedCache`]) e um handle compartilhado entre threads
//! ([`SharedCache`]).

mod list;
mod lru;
mod shared;
mod ttl;

pub use lru::{CacheStats, LruCache};
pub use shared::SharedCache;
pub use ttl::{TimedCache, TimedEntry};
