//! SQLite-backed progress store
//!
//! Manages the `~/.yatina/yatina.db` database with automatic schema
//! migration. Timestamps are stored as RFC 3339 text, question bodies as
//! tagged JSON.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use super::{ProfilePatch, ProgressFields, ProgressStore, QuestionFilter};
use crate::domain::{clamp_lives, Lesson, LessonProgress, Profile, QuestionBody, QuizQuestion};
use crate::error::StoreError;

/// Database wrapper; cheap to clone, one shared connection
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Directory holding the database and config (`~/.yatina`)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_default().join(".yatina")
    }

    /// Open or create the database at the default location
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&Self::data_dir().join("yatina.db"))
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        debug!(path = %path.display(), "opened progress store");
        Ok(store)
    }

    /// In-memory store for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("progress store lock poisoned")
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: ranking attributes on profiles
        if version < 2 {
            let has_origin: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('profiles') WHERE name = 'origin_city'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);

            if !has_origin {
                conn.execute_batch(
                    r#"
                    ALTER TABLE profiles ADD COLUMN origin_city TEXT;
                    ALTER TABLE profiles ADD COLUMN residence_city TEXT;
                    "#,
                )?;
            }
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }

    /// Insert the starter content (lessons, question banks, demo ranking
    /// profiles); idempotent, existing rows are left alone
    pub fn seed_defaults(&self) -> Result<(), StoreError> {
        let lessons = super::starter_lessons();
        {
            let conn = self.conn();
            for lesson in &lessons {
                conn.execute(
                    r#"INSERT OR IGNORE INTO lessons
                       (id, title, description, language, order_index, xp_reward, icon, color, created_at)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
                    rusqlite::params![
                        lesson.id,
                        lesson.title,
                        lesson.description,
                        lesson.language,
                        lesson.order_index,
                        lesson.xp_reward,
                        lesson.icon,
                        lesson.color,
                        lesson.created_at.to_rfc3339(),
                    ],
                )?;
            }

            let mut questions = super::starter_questions(&lessons);
            questions.extend(super::trivia_questions());
            for question in &questions {
                conn.execute(
                    r#"INSERT OR IGNORE INTO quiz_questions (id, lesson_id, prompt, body)
                       VALUES (?1, ?2, ?3, ?4)"#,
                    rusqlite::params![
                        question.id,
                        question.lesson_id,
                        question.prompt,
                        serde_json::to_string(&question.body)?,
                    ],
                )?;
            }
        }

        for profile in super::demo_profiles() {
            self.insert_profile_if_absent(&profile)?;
        }
        Ok(())
    }

    fn insert_profile_if_absent(&self, profile: &Profile) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute(
            r#"INSERT OR IGNORE INTO profiles
               (id, username, xp, level, lives, growth_stage, last_growth_visit,
                origin_city, residence_city, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            rusqlite::params![
                profile.id,
                profile.username,
                profile.xp,
                profile.level,
                profile.lives,
                profile.growth_stage,
                profile.last_growth_visit.map(|t| t.to_rfc3339()),
                profile.origin_city,
                profile.residence_city,
                profile.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn profile_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Profile> {
        Ok(Profile {
            id: row.get(0)?,
            username: row.get(1)?,
            xp: row.get(2)?,
            level: row.get(3)?,
            lives: row.get(4)?,
            growth_stage: row.get(5)?,
            last_growth_visit: row
                .get::<_, Option<String>>(6)?
                .and_then(|s| parse_timestamp(&s)),
            origin_city: row.get(7)?,
            residence_city: row.get(8)?,
            created_at: row
                .get::<_, String>(9)?
                .parse::<DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

const PROFILE_COLUMNS: &str = "id, username, xp, level, lives, growth_stage, last_growth_visit, \
     origin_city, residence_city, created_at";

#[async_trait]
impl ProgressStore for SqliteStore {
    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
            [user_id],
            Self::profile_from_row,
        )
        .optional()?
        .ok_or_else(|| StoreError::not_found(format!("profile {user_id}")))
    }

    async fn create_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        self.insert_profile_if_absent(profile)
    }

    async fn update_profile(&self, user_id: &str, patch: ProfilePatch) -> Result<(), StoreError> {
        // Read-merge-write under one lock; lives are clamped on the way in
        let conn = self.conn();
        let mut profile = conn
            .query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
                [user_id],
                Self::profile_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found(format!("profile {user_id}")))?;

        if let Some(xp) = patch.xp {
            profile.xp = xp;
        }
        if let Some(level) = patch.level {
            profile.level = level;
        }
        if let Some(lives) = patch.lives {
            profile.lives = clamp_lives(lives as i64);
        }
        if let Some(stage) = patch.growth_stage {
            profile.growth_stage = stage;
        }
        if let Some(visit) = patch.last_growth_visit {
            profile.last_growth_visit = Some(visit);
        }

        conn.execute(
            r#"UPDATE profiles
               SET xp = ?1, level = ?2, lives = ?3, growth_stage = ?4, last_growth_visit = ?5
               WHERE id = ?6"#,
            rusqlite::params![
                profile.xp,
                profile.level,
                profile.lives,
                profile.growth_stage,
                profile.last_growth_visit.map(|t| t.to_rfc3339()),
                user_id,
            ],
        )?;
        Ok(())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY xp DESC"))?;
        let profiles = stmt
            .query_map([], Self::profile_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(profiles)
    }

    async fn list_lessons(&self) -> Result<Vec<Lesson>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"SELECT id, title, description, language, order_index, xp_reward, icon, color, created_at
               FROM lessons ORDER BY order_index"#,
        )?;
        let lessons = stmt
            .query_map([], |row| {
                Ok(Lesson {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    language: row.get(3)?,
                    order_index: row.get(4)?,
                    xp_reward: row.get(5)?,
                    icon: row.get(6)?,
                    color: row.get(7)?,
                    created_at: row
                        .get::<_, String>(8)?
                        .parse::<DateTime<Utc>>()
                        .unwrap_or_else(|_| Utc::now()),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(lessons)
    }

    async fn list_progress(&self, user_id: &str) -> Result<Vec<LessonProgress>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"SELECT id, user_id, lesson_id, completed, stars, completed_at, created_at
               FROM user_progress WHERE user_id = ?1"#,
        )?;
        let progress = stmt
            .query_map([user_id], |row| {
                Ok(LessonProgress {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    lesson_id: row.get(2)?,
                    completed: row.get::<_, i32>(3)? != 0,
                    stars: row.get(4)?,
                    completed_at: row
                        .get::<_, Option<String>>(5)?
                        .and_then(|s| parse_timestamp(&s)),
                    created_at: row
                        .get::<_, String>(6)?
                        .parse::<DateTime<Utc>>()
                        .unwrap_or_else(|_| Utc::now()),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(progress)
    }

    async fn upsert_progress(
        &self,
        user_id: &str,
        lesson_id: &str,
        fields: ProgressFields,
    ) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute(
            r#"INSERT INTO user_progress (id, user_id, lesson_id, completed, stars, completed_at, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
               ON CONFLICT(user_id, lesson_id) DO UPDATE SET
                   completed = ?4, stars = ?5, completed_at = ?6"#,
            rusqlite::params![
                uuid::Uuid::new_v4().to_string(),
                user_id,
                lesson_id,
                fields.completed as i32,
                fields.stars,
                fields.completed_at.map(|t| t.to_rfc3339()),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<QuizQuestion>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"SELECT id, lesson_id, prompt, body FROM quiz_questions
               WHERE (?1 IS NULL AND lesson_id IS NULL) OR lesson_id = ?1
               ORDER BY rowid"#,
        )?;
        let rows = stmt
            .query_map([&filter.lesson_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut questions = Vec::with_capacity(rows.len());
        for (id, lesson_id, prompt, body) in rows {
            let body: QuestionBody = serde_json::from_str(&body)?;
            questions.push(QuizQuestion {
                id,
                lesson_id,
                prompt,
                body,
            });
        }
        if let Some(limit) = filter.limit {
            questions.truncate(limit);
        }
        Ok(questions)
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    s.parse::<DateTime<Utc>>().ok()
}

/// SQL schema for the progress database
const SCHEMA_SQL: &str = r#"
-- Learner profiles
CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    xp INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    lives INTEGER NOT NULL DEFAULT 5,
    growth_stage INTEGER NOT NULL DEFAULT 0,
    last_growth_visit TEXT,
    origin_city TEXT,
    residence_city TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_profiles_xp ON profiles(xp);

-- Lesson catalog (unlock chain ordered by order_index)
CREATE TABLE IF NOT EXISTS lessons (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    language TEXT NOT NULL DEFAULT 'aymara',
    order_index INTEGER NOT NULL UNIQUE,
    xp_reward INTEGER NOT NULL,
    icon TEXT NOT NULL DEFAULT 'book-open',
    color TEXT NOT NULL DEFAULT 'blue',
    created_at TEXT NOT NULL
);

-- One completion record per (user, lesson)
CREATE TABLE IF NOT EXISTS user_progress (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    lesson_id TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    stars INTEGER NOT NULL DEFAULT 0,
    completed_at TEXT,
    created_at TEXT NOT NULL,
    UNIQUE(user_id, lesson_id)
);
CREATE INDEX IF NOT EXISTS idx_progress_user ON user_progress(user_id);

-- Question bank; body is the tagged JSON answer payload
CREATE TABLE IF NOT EXISTS quiz_questions (
    id TEXT PRIMARY KEY,
    lesson_id TEXT,
    prompt TEXT NOT NULL,
    body TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_questions_lesson ON quiz_questions(lesson_id);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (2);
"#;
