#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use storefront::{Category, Product};
use tempfile::TempDir;

/// Helper struct to run storefront commands in an isolated temp directory
pub struct StorefrontTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
}

impl StorefrontTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        StorefrontTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_storefront"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("STOREFRONT_CONFIG")
            .env_remove("STOREFRONT_API_URL")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute storefront command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_success(args);
        serde_json::from_str(&stdout).expect("Failed to parse JSON output")
    }

    /// Write a product fixture and return its path
    pub fn write_fixture(&self, products: &[Product]) -> PathBuf {
        let path = self.temp_dir.path().join("products.json");
        let json = serde_json::to_string(products).expect("Failed to serialize fixture");
        fs::write(&path, json).expect("Failed to write fixture");
        path
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".storefront").join("config.yaml")
    }
}

pub fn make_product(id: u64, title: &str) -> Product {
    Product {
        id,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        price: 25.0,
        description: format!("{title} description"),
        images: vec![
            format!("https://cdn.example.com/{id}/front.jpeg"),
            format!("https://cdn.example.com/{id}/back.jpeg"),
        ],
        category: Category {
            id: 1,
            name: "Clothes".to_string(),
            slug: "clothes".to_string(),
            image: String::new(),
            creation_at: None,
            updated_at: None,
        },
        creation_at: None,
        updated_at: None,
    }
}

/// Products titled "Product 1" through "Product {count}"
pub fn numbered_products(count: u64) -> Vec<Product> {
    (1..=count)
        .map(|i| make_product(i, &format!("Product {i}")))
        .collect()
}
