//! Tipos de erro do Memora.

use thiserror::Error;

/// Tipo de resultado padrão do Memora.
pub type MemoraResult<T> = Result<T, MemoraError>;

/// Erros possíveis no Memora.
///
/// A ausência de uma chave nunca é um erro: `get` devolve `Option::None`.
#[derive(Error, Debug)]
pub enum MemoraError {
    #[error("Capacidade inválida: {0} (deve ser maior que zero)")]
    InvalidCapacity(usize),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MemoraError {
    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
