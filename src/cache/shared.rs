//! Handle compartilhado do cache LRU.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::types::config::CacheConfig;
use crate::MemoraResult;

use super::lru::{CacheStats, LruCache};

/// Handle clonável para um [`LruCache`] protegido por mutex.
///
/// Todo o par mapa+ordem fica atrás de um único lock: como `get` muda a
/// ordem de recência, leituras também são seções críticas. Valores são
/// devolvidos por cópia, então um valor já entregue a um chamador
/// continua válido mesmo que a entrada seja evictada em seguida.
///
/// Substitui o padrão de cache global mutável: uma instância construída
/// e possuída explicitamente, passada por clone do handle.
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> SharedCache<K, V> {
    /// Cria um novo cache compartilhado com a capacidade dada.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Cria um cache compartilhado a partir da configuração.
    pub fn with_config(config: &CacheConfig) -> MemoraResult<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(LruCache::with_config(config)?)),
        })
    }

    /// Busca no cache, renovando a recência da chave.
    ///
    /// O valor volta por cópia; a evicção posterior não o invalida.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lock().get(key).cloned()
    }

    /// Insere ou atualiza uma entrada, devolvendo a evictada se houver.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.lock().put(key, value)
    }

    /// Verifica presença sem alterar a ordem de recência.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lock().contains(key)
    }

    /// Remove uma entrada específica.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Limpa todo o cache.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Adquire o lock. Um lock envenenado é recuperado: nenhuma operação
    /// do cache entra em pânico com o estado parcialmente mutado.
    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
