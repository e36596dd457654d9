use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .stepvizrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().flatten() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse::<usize>().ok())
    }

    /// Upper bound on step iterations for the native and managed engines.
    pub fn step_limit(&self) -> usize {
        self.get_usize("STEP_LIMIT").unwrap_or(50)
    }

    /// Directory holding the generated driver artifacts. Paths inside it
    /// are fixed, not unique per run; the orchestrator serializes requests.
    pub fn artifact_dir(&self) -> PathBuf {
        self.get("ARTIFACT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("stepviz"))
    }

    pub fn tracer_script_path(&self) -> PathBuf {
        self.artifact_dir().join("tracer_driver.py")
    }

    pub fn native_executable_path(&self) -> PathBuf {
        self.artifact_dir().join("target.out")
    }

    pub fn debugger_script_path(&self) -> PathBuf {
        self.artifact_dir().join("gdb_commands.txt")
    }

    pub fn python_bin(&self) -> String {
        self.get("PYTHON_BIN").unwrap_or_else(|| "python3".into())
    }

    pub fn c_compiler(&self) -> String {
        self.get("C_COMPILER").unwrap_or_else(|| "gcc".into())
    }

    pub fn cpp_compiler(&self) -> String {
        self.get("CPP_COMPILER").unwrap_or_else(|| "g++".into())
    }

    pub fn gdb_bin(&self) -> String {
        self.get("GDB_BIN").unwrap_or_else(|| "gdb".into())
    }

    pub fn javac_bin(&self) -> String {
        self.get("JAVAC_BIN").unwrap_or_else(|| "javac".into())
    }

    pub fn jdb_bin(&self) -> String {
        self.get("JDB_BIN").unwrap_or_else(|| "jdb".into())
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "PYTHON_BIN",
        "C_COMPILER",
        "CPP_COMPILER",
        "GDB_BIN",
        "JAVAC_BIN",
        "JDB_BIN",
        "STEP_LIMIT",
        "ARTIFACT_DIR",
    ];

    KEYS.contains(&k) || k.starts_with("STEPVIZ_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("stepviz").join(".stepvizrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    // Tool binaries
    m.insert("PYTHON_BIN".into(), "python3".into());
    m.insert("C_COMPILER".into(), "gcc".into());
    m.insert("CPP_COMPILER".into(), "g++".into());
    m.insert("GDB_BIN".into(), "gdb".into());
    m.insert("JAVAC_BIN".into(), "javac".into());
    m.insert("JDB_BIN".into(), "jdb".into());

    // Numbers
    m.insert("STEP_LIMIT".into(), "50".into());

    // Paths
    m.insert(
        "ARTIFACT_DIR".into(),
        env::temp_dir().join("stepviz").to_string_lossy().into_owned(),
    );

    m
}
