use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A complete, valid agent document.
pub(crate) const VALID_AGENT: &str = r#"---
name: Patrick
description: Summarizes pull requests
model: anthropic/claude-sonnet
temperature: 0.3
purpose: Keep reviewers informed
capabilities:
  - summarization
evolution_history:
  - version: 1
    changes: Initial version
  - version: 2
    changes: Shorter summaries
---

# Patrick

<!-- System Prompt -->
```jinja2
You are {{ agent_name }}. {{ agent_description }}.
```

<!-- User Prompt -->
```jinja2
Summarize: {{ query }}
```

<!-- Output Schema -->
```yaml
Output:
  summary: string
  confidence: { type: number, default: 0.5 }
```
"#;

/// Build an agent document from front matter YAML and a list of
/// `(label, language, content)` sections.
pub(crate) fn agent_doc(front_matter: &str, sections: &[(&str, &str, &str)]) -> String {
    let mut doc = format!("---\n{}\n---\n", front_matter.trim_end());
    for (label, language, content) in sections {
        doc.push_str(&format!(
            "\n<!-- {} -->\n```{}\n{}\n```\n",
            label, language, content
        ));
    }
    doc
}

/// The two prompt sections every valid agent needs.
pub(crate) fn prompt_sections() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("System Prompt", "jinja2", "You are {{ agent_name }}."),
        ("User Prompt", "jinja2", "{{ query }}"),
    ]
}

/// Write `content` to `dir/relative`, creating parent directories.
pub(crate) fn write_agent(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// A temp directory laid out like a project: `ai/agents/` with one valid agent.
pub(crate) fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_agent(temp_dir.path(), "ai/agents/patrick.agent.md", VALID_AGENT);
    temp_dir
}
