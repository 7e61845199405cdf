// src/session/storage.rs

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Erro de E/S no armazenamento de sessão: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arquivo de sessão corrompido: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Uma mudança de chave: `Some` grava, `None` remove.
pub type Change<'a> = (&'a str, Option<&'a str>);

/// Backend chave-valor persistente onde a sessão mora.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Aplica todas as mudanças num passo só: quem lê vê o antes ou o depois, nunca a metade.
    fn apply(&self, changes: &[Change<'_>]) -> Result<(), StorageError>;

    /// Várias chaves lidas do mesmo estado.
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.apply(&[(key, Some(value))])
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.apply(&[(key, None)])
    }
}

// ---
// 1. Memória (testes e uso efêmero)
// ---
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn apply(&self, changes: &[Change<'_>]) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        for (key, value) in changes {
            match value {
                Some(value) => entries.insert(key.to_string(), value.to_string()),
                None => entries.remove(*key),
            };
        }
        Ok(())
    }

    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let entries = self.entries.read();
        Ok(keys.iter().map(|key| entries.get(*key).cloned()).collect())
    }
}

// ---
// 2. Arquivo JSON (sobrevive a reinícios, compartilhado entre processos)
// ---
// O arquivo é a fonte da verdade: toda leitura vai ao disco, então outro processo
// que fizer logout invalida a sessão deste na próxima requisição.
// Escritas são serializadas por um lock exclusivo em `<arquivo>.lock`, que vale
// entre processos e entre instâncias do mesmo processo.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut raw = self.path.clone().into_os_string();
        raw.push(".lock");
        PathBuf::from(raw)
    }

    // O lock é liberado quando o File é fechado (drop)
    fn lock_exclusive(&self) -> Result<File, StorageError> {
        std::fs::create_dir_all(self.dir())?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock()?;
        Ok(file)
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    // Escrita atômica: temporário com nome único no mesmo diretório + rename
    fn persist(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let mut tmp = tempfile::NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&serde_json::to_vec_pretty(entries)?)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.load()?;
        Ok(entries.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    fn apply(&self, changes: &[Change<'_>]) -> Result<(), StorageError> {
        let _lock = self.lock_exclusive()?;
        let mut entries = self.load()?;

        let mut dirty = false;
        for (key, value) in changes {
            match value {
                Some(value) => {
                    entries.insert(key.to_string(), Value::String(value.to_string()));
                    dirty = true;
                }
                None => dirty |= entries.remove(*key).is_some(),
            }
        }

        if dirty {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let entries = self.load()?;
        Ok(keys
            .iter()
            .map(|key| entries.get(*key).and_then(|v| v.as_str()).map(str::to_string))
            .collect())
    }
}
