//! Cache LRU de capacidade fixa.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::types::config::CacheConfig;
use crate::MemoraResult;

use super::list::RecencyList;

/// Estatísticas do cache.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,

    /// Número de evicções por falta de espaço.
    pub evictions: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache associativo de capacidade fixa com evicção LRU.
///
/// Mantém um mapa de chave para slot e uma lista de recência sobre os
/// mesmos slots: a frente da lista é sempre a próxima candidata à
/// evicção. `get` e `put` são O(1) amortizado.
///
/// A capacidade é fixada na construção. Capacidade zero é um cache
/// degenerado válido: nenhuma entrada é retida e todo `get` é um miss.
/// Para a construção validada, que rejeita capacidade zero, use
/// [`LruCache::with_config`].
///
/// A estrutura não é thread-safe; `&mut self` garante acesso exclusivo.
/// Para uso concorrente, veja [`super::SharedCache`].
pub struct LruCache<K, V> {
    capacity: usize,
    map: HashMap<K, usize>,
    order: RecencyList<(K, V)>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Cria um novo cache com a capacidade dada.
    ///
    /// `capacity == 0` produz o cache degenerado que nunca retém entradas.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Cria um cache a partir da configuração, validando a capacidade.
    ///
    /// Capacidade zero é um erro de configuração, reportado aqui na
    /// construção e nunca adiado para o primeiro uso.
    pub fn with_config(config: &CacheConfig) -> MemoraResult<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity))
    }

    /// Capacidade máxima do cache.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Número atual de entradas. Sempre `<= capacity()`.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Busca no cache.
    ///
    /// Um acerto marca a chave como mais recentemente usada; a mutação
    /// da ordem de recência num `get` é a propriedade que define o LRU.
    /// Ausência é devolvida como `None`, sem nenhum outro efeito.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(idx) => {
                self.order.move_to_back(idx);
                self.hits += 1;
                self.order.get(idx).map(|(_, v)| v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Busca sem alterar a ordem de recência nem as estatísticas.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map
            .get(key)
            .and_then(|&idx| self.order.get(idx))
            .map(|(_, v)| v)
    }

    /// Entrada menos recentemente usada: a próxima candidata à evicção.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|(k, v)| (k, v))
    }

    /// Verifica presença sem alterar a ordem de recência.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Remove uma entrada específica.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.map.remove(key)?;
        self.order.remove(idx).map(|(_, v)| v)
    }

    /// Remove e devolve a entrada menos recentemente usada.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_front()?;
        self.map.remove(&key);
        self.evictions += 1;
        Some((key, value))
    }

    /// Limpa todo o cache. As estatísticas acumuladas são preservadas.
    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
        tracing::debug!(capacity = self.capacity, "cache cleared");
    }

    /// Itera da entrada menos para a mais recentemente usada, sem
    /// alterar a ordem de recência.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().map(|(k, v)| (k, v))
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.map.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Insere ou atualiza uma entrada.
    ///
    /// Atualizar uma chave existente substitui o valor e renova a
    /// recência; nunca conta como inserção nova e nunca evicta. Inserir
    /// uma chave nova com o cache cheio evicta antes exatamente a
    /// entrada da frente da lista de recência, devolvida ao chamador.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            // Cache degenerado: nada é retido
            return None;
        }

        if let Some(&idx) = self.map.get(&key) {
            self.order.move_to_back(idx);
            if let Some(slot) = self.order.get_mut(idx) {
                slot.1 = value;
            }
            return None;
        }

        let evicted = if self.map.len() == self.capacity {
            let entry = self.pop_lru();
            if entry.is_some() {
                tracing::trace!(
                    capacity = self.capacity,
                    "least recently used entry evicted"
                );
            }
            entry
        } else {
            None
        };

        let idx = self.order.push_back((key.clone(), value));
        self.map.insert(key, idx);

        evicted
    }
}
