pub mod edit;
pub mod init;
pub mod preview;
pub mod show;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};
pub use show::{show, ShowArgs};

use crate::config::Config;
use crate::store::JsonFileStore;
use anyhow::anyhow;
use pagecraft_editor::EditorError;

fn open_store(config: &Config, cwd: &str) -> JsonFileStore {
    JsonFileStore::new(config.get_store_dir(cwd))
}

/// Lift an editor error into the wording shown to the practitioner
fn describe(err: EditorError) -> anyhow::Error {
    anyhow!("{} ({})", err.user_message(), err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{PageDocument, SectionKey, ServiceKey};
    use pagecraft_editor::PersistenceService;
    use std::fs;

    fn init_args(owner: &str) -> InitArgs {
        InitArgs {
            owner: owner.to_string(),
            name: "Dr. John Doe".to_string(),
            phone: String::new(),
            email: "john.doe@example.com".to_string(),
            address: String::new(),
            force: false,
        }
    }

    async fn stored(cwd: &str, owner: &str) -> PageDocument {
        let config = Config::load(cwd).unwrap();
        open_store(&config, cwd).fetch_document(owner).await.unwrap()
    }

    #[tokio::test]
    async fn test_init_edit_preview() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(init_args("dr-1"), &cwd).await.unwrap();
        assert_eq!(stored(&cwd, "dr-1").await.info().unwrap().name, "Dr. John Doe");

        let script = dir.path().join("edits.json");
        fs::write(
            &script,
            r#"[
                { "type": "reorderSection", "active": "services", "over": "info" },
                { "type": "toggleServiceVisibility", "service": "voice" },
                { "type": "editSectionField", "section": "banner", "field": "text", "value": "Closed for holidays" },
                { "type": "toggleServiceVisibility", "service": "ghost" }
            ]"#,
        )
        .unwrap();
        edit(
            EditArgs {
                owner: "dr-1".to_string(),
                script,
                dry_run: false,
            },
            &cwd,
        )
        .await
        .unwrap();

        let doc = stored(&cwd, "dr-1").await;
        assert_eq!(doc.section_order()[0], SectionKey::Services);
        assert!(!doc.service(&ServiceKey::from("voice")).unwrap().is_visible());
        assert_eq!(doc.banner().unwrap().text, "Closed for holidays");

        preview(
            PreviewArgs {
                owner: "dr-1".to_string(),
                public: true,
                stdout: false,
                out_dir: None,
            },
            &cwd,
        )
        .await
        .unwrap();

        let html = fs::read_to_string(dir.path().join("dist").join("dr-1.html")).unwrap();
        assert!(html.contains("Closed for holidays"));
        assert!(!html.contains("Voice Consultation"));
    }

    #[tokio::test]
    async fn test_init_keeps_existing_page() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(init_args("dr-1"), &cwd).await.unwrap();
        let mut again = init_args("dr-1");
        again.name = "Someone Else".to_string();
        init(again, &cwd).await.unwrap();

        assert_eq!(stored(&cwd, "dr-1").await.info().unwrap().name, "Dr. John Doe");
    }

    #[tokio::test]
    async fn test_dry_run_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        init(init_args("dr-1"), &cwd).await.unwrap();

        let script = dir.path().join("edits.json");
        fs::write(
            &script,
            r#"[{ "type": "toggleSectionVisibility", "section": "info" }]"#,
        )
        .unwrap();
        edit(
            EditArgs {
                owner: "dr-1".to_string(),
                script,
                dry_run: true,
            },
            &cwd,
        )
        .await
        .unwrap();

        assert!(stored(&cwd, "dr-1").await.section(SectionKey::Info).unwrap().is_visible());
    }

    #[tokio::test]
    async fn test_edit_missing_page() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        let script = dir.path().join("edits.json");
        fs::write(&script, "[]").unwrap();

        let err = edit(
            EditArgs {
                owner: "nobody".to_string(),
                script,
                dry_run: false,
            },
            &cwd,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Profile could not be found"));
    }
}
