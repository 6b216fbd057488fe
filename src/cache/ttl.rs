//! Cache LRU com expiração por TTL.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::types::config::CacheConfig;
use crate::MemoraResult;

use super::lru::{CacheStats, LruCache};

// ═══════════════════════════════════════════════════════════════════════════
// Entrada com validade
// ═══════════════════════════════════════════════════════════════════════════

/// Valor em cache com o momento em que foi armazenado.
#[derive(Debug, Clone)]
pub struct TimedEntry<V> {
    /// Valor armazenado.
    pub value: V,

    /// Momento em que foi cacheado.
    pub cached_at: DateTime<Utc>,
}

impl<V> TimedEntry<V> {
    /// Cria uma nova entrada datada de agora.
    pub fn new(value: V) -> Self {
        Self {
            value,
            cached_at: Utc::now(),
        }
    }

    /// Verifica se a entrada expirou.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed > ttl
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimedCache
// ═══════════════════════════════════════════════════════════════════════════

/// Cache LRU cujas entradas também expiram por tempo.
///
/// A evicção LRU continua valendo para pressão de capacidade; o TTL
/// remove entradas velhas mesmo quando há espaço. Uma entrada expirada
/// é descartada na leitura e contada como miss.
pub struct TimedCache<K, V> {
    cache: LruCache<K, TimedEntry<V>>,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq + Clone, V> TimedCache<K, V> {
    /// Cria um novo cache.
    ///
    /// # Argumentos
    /// - `capacity`: número máximo de entradas
    /// - `ttl`: tempo de vida das entradas (zero = sempre expirado)
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: LruCache::new(capacity),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Cria um cache a partir da configuração, validando a capacidade.
    pub fn with_config(config: &CacheConfig) -> MemoraResult<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity, config.ttl()))
    }

    /// Tempo de vida configurado.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Número de entradas retidas, expiradas ou não.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Busca no cache.
    ///
    /// Retorna `None` se não encontrado ou se expirado. A checagem de
    /// expiração usa `peek` para não renovar a recência de uma entrada
    /// que está prestes a ser descartada.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let is_expired = self.cache.peek(key).map(|e| e.is_expired(self.ttl));

        match is_expired {
            Some(true) => {
                // Expirada: remove e conta como miss
                self.cache.remove(key);
                self.misses += 1;
                None
            }
            Some(false) => {
                self.hits += 1;
                self.cache.get(key).map(|e| &e.value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insere no cache, datando a entrada de agora.
    pub fn insert(&mut self, key: K, value: V) {
        self.cache.put(key, TimedEntry::new(value));
    }

    /// Invalida uma entrada específica.
    pub fn invalidate<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.cache.remove(key).map(|e| e.value)
    }

    /// Limpa todo o cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Remove entradas expiradas e devolve quantas foram removidas.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<K> = self
            .cache
            .iter()
            .filter(|(_, e)| e.is_expired(self.ttl))
            .map(|(k, _)| k.clone())
            .collect();

        let removed = expired_keys.len();
        for key in &expired_keys {
            self.cache.remove(key);
        }

        if removed > 0 {
            tracing::debug!(removed, "expired entries swept");
        }
        removed
    }

    /// Retorna estatísticas do cache.
    ///
    /// Acertos e erros são contados aqui, onde a expiração é decidida;
    /// as evicções vêm do LRU interno.
    pub fn stats(&self) -> CacheStats {
        let inner = self.cache.stats();
        CacheStats {
            size: inner.size,
            capacity: inner.capacity,
            hits: self.hits,
            misses: self.misses,
            evictions: inner.evictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = TimedCache::new(10, Duration::from_secs(60));
        cache.insert("key", 42);

        assert_eq!(cache.get("key"), Some(&42));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_miss_on_absent_key() {
        let mut cache: TimedCache<&str, u32> = TimedCache::new(10, Duration::from_secs(60));

        assert_eq!(cache.get("nope"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_zero_ttl_always_expires() {
        // TTL de 0 segundos = sempre expirado
        let mut cache = TimedCache::new(10, Duration::from_secs(0));
        cache.insert("key", 42);

        assert_eq!(cache.get("key"), None);
        // A entrada expirada foi descartada na leitura
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_long_ttl_does_not_expire() {
        let mut cache = TimedCache::new(10, Duration::from_secs(3600));
        cache.insert("key", 42);

        assert_eq!(cache.get("key"), Some(&42));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_eviction_still_applies() {
        let mut cache = TimedCache::new(2, Duration::from_secs(3600));
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c"); // Deve evictar a chave 1

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), Some(&"c"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = TimedCache::new(10, Duration::from_secs(60));
        cache.insert("key", 42);

        assert_eq!(cache.invalidate("key"), Some(42));
        assert_eq!(cache.get("key"), None);
        assert_eq!(cache.invalidate("key"), None);
    }

    #[test]
    fn test_clear() {
        let mut cache = TimedCache::new(10, Duration::from_secs(60));
        cache.insert(1, "a");
        cache.insert(2, "b");

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn test_cleanup_expired() {
        let mut cache = TimedCache::new(10, Duration::from_secs(0));
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");

        assert_eq!(cache.cleanup_expired(), 3);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_cleanup_keeps_live_entries() {
        let mut cache = TimedCache::new(10, Duration::from_secs(3600));
        cache.insert(1, "a");
        cache.insert(2, "b");

        assert_eq!(cache.cleanup_expired(), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_with_config() {
        let config = CacheConfig {
            capacity: 4,
            ttl_secs: 120,
        };
        let cache: TimedCache<u32, u32> = TimedCache::with_config(&config).unwrap();
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.ttl(), Duration::from_secs(120));

        let bad = CacheConfig {
            capacity: 0,
            ttl_secs: 120,
        };
        assert!(TimedCache::<u32, u32>::with_config(&bad).is_err());
    }

    #[test]
    fn test_timed_entry_is_expired() {
        let entry = TimedEntry::new(42);

        // Com TTL de 1 hora, não deve estar expirada
        assert!(!entry.is_expired(Duration::from_secs(3600)));

        // Com TTL de 0, deve estar expirada
        assert!(entry.is_expired(Duration::from_secs(0)));
    }
}
