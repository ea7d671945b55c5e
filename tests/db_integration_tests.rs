//! Integration tests for the database layer.
//!
//! These tests verify the task repository operations using an in-memory
//! SQLite database, plus schema bootstrap behavior against a file on disk.

use taskd::db::Database;

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

mod create_tests {
    use super::*;

    #[test]
    fn create_task_assigns_id_and_defaults() {
        let db = setup_db();

        let task = db
            .create_task("Buy milk", Some("2%"))
            .expect("Failed to create task");

        assert!(task.id > 0);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, Some("2%".to_string()));
        assert!(!task.completed);
        assert!(!task.created_at.is_empty());
    }

    #[test]
    fn create_task_without_description_stores_null() {
        let db = setup_db();

        let task = db.create_task("No details", None).unwrap();

        assert_eq!(task.description, None);
    }

    #[test]
    fn create_task_ids_are_monotonic() {
        let db = setup_db();

        let first = db.create_task("first", None).unwrap();
        let second = db.create_task("second", None).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let db = setup_db();

        db.create_task("keep", None).unwrap();
        let doomed = db.create_task("doomed", None).unwrap();
        db.delete_task(doomed.id).unwrap();

        let next = db.create_task("next", None).unwrap();

        assert!(next.id > doomed.id);
    }
}

mod get_tests {
    use super::*;

    #[test]
    fn get_task_returns_created_task_unchanged() {
        let db = setup_db();
        let created = db.create_task("Buy milk", Some("2%")).unwrap();

        let found = db.get_task(created.id).unwrap();

        assert_eq!(found, Some(created));
    }

    #[test]
    fn get_task_returns_none_for_unknown_id() {
        let db = setup_db();

        let result = db.get_task(9999).unwrap();

        assert!(result.is_none());
    }
}

mod list_tests {
    use super::*;

    #[test]
    fn list_tasks_returns_empty_for_fresh_db() {
        let db = setup_db();

        let tasks = db.list_tasks(None).unwrap();

        assert!(tasks.is_empty());
    }

    #[test]
    fn list_tasks_unfiltered_returns_all_rows() {
        let db = setup_db();
        db.create_task("a", None).unwrap();
        db.create_task("b", None).unwrap();
        db.create_task("c", None).unwrap();

        let tasks = db.list_tasks(None).unwrap();

        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn list_tasks_filters_by_completion() {
        let db = setup_db();
        let done = db.create_task("done", None).unwrap();
        let open = db.create_task("open", None).unwrap();
        db.update_task(done.id, "done", None, true).unwrap();

        let completed = db.list_tasks(Some(true)).unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, done.id);

        let pending = db.list_tasks(Some(false)).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, open.id);
    }
}

mod update_tests {
    use super::*;

    #[test]
    fn update_task_replaces_all_mutable_fields() {
        let db = setup_db();
        let created = db.create_task("Old", Some("old desc")).unwrap();

        let updated = db
            .update_task(created.id, "New", Some("D"), true)
            .unwrap()
            .expect("task should exist");

        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, Some("D".to_string()));
        assert!(updated.completed);
        // Immutable columns survive the replace
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_task_clears_omitted_description() {
        let db = setup_db();
        let created = db.create_task("T", Some("present")).unwrap();

        let updated = db.update_task(created.id, "T", None, false).unwrap().unwrap();

        assert_eq!(updated.description, None);
    }

    #[test]
    fn update_task_returns_none_for_unknown_id() {
        let db = setup_db();

        let result = db.update_task(4242, "ghost", None, true).unwrap();

        assert!(result.is_none());
    }
}

mod delete_tests {
    use super::*;

    #[test]
    fn delete_task_removes_the_row() {
        let db = setup_db();
        let created = db.create_task("gone soon", None).unwrap();

        db.delete_task(created.id).unwrap();

        assert!(db.get_task(created.id).unwrap().is_none());
    }

    #[test]
    fn delete_task_is_idempotent() {
        let db = setup_db();
        let created = db.create_task("twice", None).unwrap();

        db.delete_task(created.id).expect("first delete");
        db.delete_task(created.id).expect("second delete");
        db.delete_task(777).expect("delete of never-created id");
    }
}

mod bootstrap_tests {
    use super::*;

    #[test]
    fn reopening_database_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");

        let created = {
            let db = Database::open(&path).unwrap();
            db.create_task("persisted", None).unwrap()
        };

        // Second open re-runs the schema bootstrap; it must be a no-op
        let db = Database::open(&path).unwrap();
        let found = db.get_task(created.id).unwrap();

        assert_eq!(found, Some(created));
    }
}
