// ==========================================
// 賃貸管理システム - 持久存储接缝
// ==========================================
// 职责: 规范存储的装载/保存接口（宿主持有的不透明键值槽）
// 非目标: 存储引擎设计 —— 核心只整体读写一个 JSON 块
// ==========================================

use crate::domain::database::Database;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

/// 键值槽的固定键（模式版本串）
pub const STORE_KEY: &str = "rental_core_db_v1";

// ==========================================
// StoreError - 存储层错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("存储读取失败: {0}")]
    ReadError(String),

    #[error("存储写入失败: {0}")]
    WriteError(String),

    #[error("序列化失败: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("存储槽已被占用: {0}")]
    LockError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// PersistentStore Trait - 持久存储（外部协作者接口）
// ==========================================
pub trait PersistentStore: Send + Sync {
    /// 装载规范存储（槽为空时 Ok(None)）
    fn load(&self) -> Result<Option<Database>, StoreError>;

    /// 整体保存规范存储（读-改-写，无局部写入）
    fn save(&self, db: &Database) -> Result<(), StoreError>;
}

/// 装载，槽为空时给出默认存储（空集合 + 默认配置 + 版本标签）
pub fn load_or_default(store: &dyn PersistentStore) -> Result<Database, StoreError> {
    match store.load()? {
        Some(db) => Ok(db),
        None => {
            info!(key = STORE_KEY, "存储槽为空，使用默认规范存储");
            Ok(Database::default())
        }
    }
}

// ==========================================
// JsonFileStore - JSON 文件实现
// ==========================================
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 默认存储路径: <数据目录>/rental-core/<STORE_KEY>.json
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rental-core")
            .join(format!("{}.json", STORE_KEY))
    }
}

impl PersistentStore for JsonFileStore {
    fn load(&self) -> Result<Option<Database>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let db: Database = serde_json::from_str(&content)?;
        Ok(Some(db))
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::WriteError(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(db)?;
        fs::write(&self.path, json).map_err(|e| StoreError::WriteError(e.to_string()))?;
        Ok(())
    }
}

// ==========================================
// MemoryStore - 内存实现（测试 / 嵌入宿主）
// ==========================================
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Database>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn load(&self) -> Result<Option<Database>, StoreError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, db: &Database) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        *slot = Some(db.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::Property;

    fn sample_db() -> Database {
        let mut db = Database::default();
        db.properties.push(Property {
            id: 1,
            name: "Sakura".to_string(),
            address: String::new(),
            postal_code: String::new(),
            phone: String::new(),
            unit_type: String::new(),
            capacity: 2,
            rent_cost: 50000,
            rent_price_uns: 80000,
            parking_cost: 0,
            contract_start: None,
            contract_end: None,
        });
        db
    }

    #[test]
    fn test_load_or_default_on_empty_slot() {
        let store = MemoryStore::new();
        let db = load_or_default(&store).unwrap();
        assert_eq!(db.version, crate::DB_VERSION);
        assert!(db.properties.is_empty());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        store.save(&sample_db()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.properties.len(), 1);
        assert_eq!(loaded.properties[0].name, "Sakura");
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("db").join("store.json"));

        assert!(store.load().unwrap().is_none());
        store.save(&sample_db()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.properties[0].rent_price_uns, 80000);
    }
}
