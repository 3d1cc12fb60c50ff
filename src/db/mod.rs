mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, Row};

use crate::error::{self, Error};
use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "pressroom")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("pressroom.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Blog operations
    // ============================================================

    pub fn get_all_blogs(&self) -> error::Result<Vec<Blog>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, subtitle, time, cover, hits, content_url
             FROM blogs ORDER BY id",
        )?;

        let blogs = stmt
            .query_map([], blog_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(blogs)
    }

    pub fn get_blog(&self, id: i64) -> error::Result<Option<Blog>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, title, subtitle, time, cover, hits, content_url
             FROM blogs WHERE id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(blog_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Add one view to a post and return the updated record.
    ///
    /// The increment is a single `hits = hits + 1` statement, so concurrent
    /// calls for the same id never lose counts.
    pub fn add_hit(&self, id: i64) -> error::Result<Option<Blog>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("UPDATE blogs SET hits = hits + 1 WHERE id = ?", [id])?;
        if rows == 0 {
            return Ok(None);
        }

        let blog = conn.query_row(
            "SELECT id, title, subtitle, time, cover, hits, content_url
             FROM blogs WHERE id = ?",
            [id],
            blog_from_row,
        )?;
        Ok(Some(blog))
    }

    /// Insert a post into the catalogue.
    ///
    /// Administrative path used by seeding tools and tests; the HTTP API
    /// does not expose post creation.
    pub fn insert_blog(&self, input: CreateBlogInput) -> error::Result<Blog> {
        if input.title.is_empty() {
            return Err(Error::validation("blog title must not be empty"));
        }
        if input.subtitle.is_empty() {
            return Err(Error::validation("blog subtitle must not be empty"));
        }
        if input.content_url.is_empty() {
            return Err(Error::validation("blog content_url must not be empty"));
        }

        let time = input
            .time
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO blogs (title, subtitle, time, cover, hits, content_url)
             VALUES (?, ?, ?, ?, 0, ?)",
            (
                &input.title,
                &input.subtitle,
                &time,
                &input.cover,
                &input.content_url,
            ),
        )?;

        Ok(Blog {
            id: conn.last_insert_rowid(),
            title: input.title,
            subtitle: input.subtitle,
            time,
            cover: input.cover,
            hits: 0,
            content_url: input.content_url,
        })
    }

    // ============================================================
    // Remark operations
    // ============================================================

    /// List remarks visible to clients, oldest first.
    ///
    /// Soft-deleted remarks stay in the store but are filtered out here.
    pub fn get_remarks(&self) -> error::Result<Vec<Remark>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, blog_id, is_reply, target_id, content, create_at, if_del, user_name, target_name
             FROM remarks WHERE if_del = 0 ORDER BY create_at, id",
        )?;

        let remarks = stmt
            .query_map([], remark_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(remarks)
    }

    pub fn create_remark(&self, input: CreateRemarkInput) -> error::Result<Remark> {
        if input.content.is_empty() {
            return Err(Error::validation("remark content must not be empty"));
        }
        if input.user_name.is_empty() {
            return Err(Error::validation("remark user_name must not be empty"));
        }
        if input.target_name.is_empty() {
            return Err(Error::validation("remark target_name must not be empty"));
        }
        if input.create_at.is_empty() {
            return Err(Error::validation("remark create_at must not be empty"));
        }

        // Verify the owning post exists
        self.get_blog(input.blog_id)?
            .ok_or_else(|| Error::not_found("blog", input.blog_id))?;

        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO remarks (blog_id, is_reply, target_id, content, create_at, if_del, user_name, target_name)
             VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
            (
                input.blog_id,
                input.is_reply,
                &input.target_id,
                &input.content,
                &input.create_at,
                &input.user_name,
                &input.target_name,
            ),
        )?;

        Ok(Remark {
            id: conn.last_insert_rowid(),
            blog_id: input.blog_id,
            is_reply: input.is_reply,
            target_id: input.target_id,
            content: input.content,
            create_at: input.create_at,
            if_del: false,
            user_name: input.user_name,
            target_name: input.target_name,
        })
    }

    /// Flag a remark as deleted and return the updated record.
    ///
    /// The row is retained; deleting an already-deleted remark succeeds
    /// and leaves the flag set.
    pub fn delete_remark(&self, id: i64) -> error::Result<Option<Remark>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("UPDATE remarks SET if_del = 1 WHERE id = ?", [id])?;
        if rows == 0 {
            return Ok(None);
        }

        let remark = conn.query_row(
            "SELECT id, blog_id, is_reply, target_id, content, create_at, if_del, user_name, target_name
             FROM remarks WHERE id = ?",
            [id],
            remark_from_row,
        )?;
        Ok(Some(remark))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn blog_from_row(row: &Row) -> rusqlite::Result<Blog> {
    Ok(Blog {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        time: row.get(3)?,
        cover: row.get(4)?,
        hits: row.get(5)?,
        content_url: row.get(6)?,
    })
}

fn remark_from_row(row: &Row) -> rusqlite::Result<Remark> {
    Ok(Remark {
        id: row.get(0)?,
        blog_id: row.get(1)?,
        is_reply: row.get::<_, i64>(2)? != 0,
        target_id: row.get(3)?,
        content: row.get(4)?,
        create_at: row.get(5)?,
        if_del: row.get::<_, i64>(6)? != 0,
        user_name: row.get(7)?,
        target_name: row.get(8)?,
    })
}
