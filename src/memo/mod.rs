//! Memoização de funções sobre o cache LRU.
//!
//! Um [`Memoizer`] guarda resultados de uma computação cara indexados
//! pelo argumento, com a mesma política de evicção LRU do cache: os
//! resultados menos recentemente consultados são descartados primeiro.

use std::hash::Hash;

use crate::cache::{CacheStats, LruCache};
use crate::types::config::MemoConfig;
use crate::MemoraResult;

/// Cache de resultados de função com evicção LRU.
///
/// Os valores voltam por cópia, então o memoizador funciona inclusive
/// com o cache degenerado de capacidade zero: a computação roda a cada
/// chamada e o resultado é devolvido do mesmo jeito.
pub struct Memoizer<K, V> {
    cache: LruCache<K, V>,
}

impl<K: Hash + Eq + Clone, V: Clone> Memoizer<K, V> {
    /// Cria um novo memoizador com a capacidade dada.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Cria um memoizador a partir da configuração, validando a capacidade.
    pub fn with_config(config: &MemoConfig) -> MemoraResult<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity))
    }

    /// Devolve o resultado memoizado ou computa, guarda e devolve.
    ///
    /// Um acerto renova a recência da chave, como qualquer `get` do LRU.
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(value) = self.cache.get(&key) {
            return value.clone();
        }

        let value = f(&key);
        self.cache.put(key, value.clone());
        value
    }

    /// Variante falível: uma computação que falha não guarda nada.
    pub fn try_get_or_insert_with<F, E>(&mut self, key: K, f: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        if let Some(value) = self.cache.get(&key) {
            return Ok(value.clone());
        }

        let value = f(&key)?;
        self.cache.put(key, value.clone());
        Ok(value)
    }

    /// Descarta o resultado memoizado de uma chave, forçando recomputação.
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.cache.remove(key)
    }

    /// Número de resultados memoizados.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Limpa todos os resultados.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Retorna estatísticas do cache interno.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
