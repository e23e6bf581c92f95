//! Common test utilities for pg2dbml tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use pg2dbml::{convert_schema, ConvertOptions, ConvertOutput};

/// Test context with temporary directory for isolated test execution
pub struct TestContext {
    /// Kept to prevent temp directory cleanup until TestContext is dropped
    _temp_dir: TempDir,
    pub fixture_dir: PathBuf,
    /// Stored for debugging purposes
    _fixture_name: String,
}

impl TestContext {
    /// Create a new test context by copying a fixture to a temp directory
    pub fn with_fixture(fixture_name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(fixture_name);

        let fixture_dir = temp_dir.path().to_path_buf();

        // Copy fixture to temp directory
        copy_dir_recursive(&fixture_path, &fixture_dir).expect("Failed to copy fixture");

        Self {
            _temp_dir: temp_dir,
            fixture_dir,
            _fixture_name: fixture_name.to_string(),
        }
    }

    /// Get the path to the fixture's schema.sql
    pub fn schema_path(&self) -> PathBuf {
        self.fixture_dir.join("schema.sql")
    }

    /// Get the path to the fixture's .dbmlproj file
    pub fn project_path(&self) -> PathBuf {
        self.fixture_dir.join("project.dbmlproj")
    }

    /// Output directory inside the temp directory
    pub fn output_dir(&self) -> PathBuf {
        self.fixture_dir.join("output")
    }

    /// Options converting the fixture's schema into `output_dir()`
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            input_path: Some(self.schema_path()),
            output_dir: Some(self.output_dir()),
            write_json: true,
            ..Default::default()
        }
    }

    /// Convert with the given options, panicking if the conversion fails.
    pub fn convert_successfully(&self, options: ConvertOptions) -> ConvertOutput {
        match convert_schema(options) {
            Ok(output) => output,
            Err(e) => panic!(
                "Conversion failed for fixture '{}': {:?}",
                self._fixture_name, e
            ),
        }
    }

    /// Write an extra file into the fixture directory
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.fixture_dir.join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

/// Read a generated file to a string
pub fn read_output(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst)?;
    }

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}
