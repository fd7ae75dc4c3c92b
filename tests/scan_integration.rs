//! Integration tests for scanning module trees.
//!
//! Fixture trees are written to temporary directories and scanned end to end.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use tf_docs::{
    DocError, ModuleDocument, ModuleReference, ModuleWalker, Output, Resource, ScanConfig,
    Scanner, Variable, CONFIG_FILENAME,
};

fn create_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const MODULE_MAIN: &str = r#"// {name} is a test module
variable "test" {
  type        = string
  description = "this is a variable"
}

output "test" {
  value       = aws_ami.ami.id
  description = "output description"
}

// this is a resource
resource "aws_ami" "ami" {
  name = "ami"
}

// here's a module
module "test" {
  source = "../"
}
"#;

fn module_main(name: &str) -> String {
    MODULE_MAIN.replace("{name}", name)
}

fn expected_module(title: &str, path: &str, link: &str) -> ModuleDocument {
    ModuleDocument {
        title: title.to_string(),
        path: path.to_string(),
        link: link.to_string(),
        description: format!("{title} is a test module"),
        variables: vec![Variable::new("test", "string", "this is a variable", "")],
        outputs: vec![Output {
            name: "test".to_string(),
            description: "output description".to_string(),
        }],
        resources: vec![Resource {
            resource_type: "aws_ami".to_string(),
            name: "ami".to_string(),
            description: "this is a resource".to_string(),
        }],
        modules: vec![ModuleReference {
            name: "test".to_string(),
            source: "../".to_string(),
            description: "here's a module".to_string(),
        }],
    }
}

// ============================================================================
// End-to-end extraction
// ============================================================================

mod end_to_end {
    use super::*;

    #[test]
    fn test_single_module_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("depth1");
        create_file(&root, "main.tf", &module_main("depth1"));

        let docs = Scanner::default().scan(&root).unwrap();

        assert_eq!(docs, vec![expected_module("depth1", "", "depth1")]);
        assert!(docs[0].variables[0].required);
    }

    #[test]
    fn test_two_modules_below_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("depth2");
        create_file(&root, "module1/main.tf", &module_main("module1"));
        create_file(&root, "module2/main.tf", &module_main("module2"));

        let docs = Scanner::default().scan(&root).unwrap();

        assert_eq!(
            docs,
            vec![
                expected_module("module1", "", "module1"),
                expected_module("module2", "", "module2"),
            ]
        );
    }

    #[test]
    fn test_nested_module_link() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_file(root, "aws/network/vpc/main.tf", &module_main("vpc"));

        let docs = Scanner::default().scan(root).unwrap();

        assert_eq!(docs, vec![expected_module("vpc", "aws/network", "aws-network_vpc")]);
    }

    #[test]
    fn test_description_needs_title_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("network");
        create_file(&root, "main.tf", &module_main("storage"));

        let docs = Scanner::default().scan(&root).unwrap();
        assert_eq!(docs[0].description, "");
    }

    #[test]
    fn test_files_merge_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("app");
        create_file(
            &root,
            "variables.tf",
            "variable \"b\" {\n  type = string\n  default = \"x\"\n}\n",
        );
        create_file(
            &root,
            "main.tf",
            "// app wires things together\nvariable \"a\" {\n  type = list(string)\n  default = [\"one\", \"two\"]\n}\n",
        );

        let docs = Scanner::default().scan(&root).unwrap();
        let doc = &docs[0];

        assert_eq!(doc.description, "app wires things together");
        assert_eq!(
            doc.variables,
            vec![
                Variable::new("a", "list(string)", "", "[one, two]"),
                Variable::new("b", "string", "", "x"),
            ]
        );
        assert!(doc.variables.iter().all(|v| !v.required));
    }

    #[test]
    fn test_json_shape() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("depth1");
        create_file(&root, "main.tf", &module_main("depth1"));

        let docs = Scanner::default().scan(&root).unwrap();
        let json = serde_json::to_value(&docs).unwrap();

        assert_eq!(json[0]["title"], "depth1");
        assert_eq!(json[0]["variables"][0]["type"], "string");
        assert_eq!(json[0]["resources"][0]["type"], "aws_ami");
        assert_eq!(json[0]["modules"][0]["source"], "../");
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failures {
    use super::*;

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = Scanner::default()
            .scan(&temp_dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));
    }

    #[test]
    fn test_no_modules() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "none/README.md", "# none");

        let err = Scanner::default().scan(temp_dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("no modules found in path"));
    }

    #[test]
    fn test_syntax_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("broken");
        create_file(&root, "main.tf", "variable \"a\" {\n  type = string\n}\n");
        create_file(&root, "outputs.tf", "output \"x\" {\n  value = \n");

        let err = Scanner::default().scan(&root).unwrap_err();
        match err.root_cause() {
            DocError::Syntax { file, .. } => assert_eq!(file, "outputs.tf"),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_type_fails_module() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("vars");
        create_file(
            &root,
            "variables.tf",
            "variable \"good\" {\n  type = string\n}\n\nvariable \"bad\" {\n  description = \"no type\"\n}\n",
        );

        let err = Scanner::default().scan(&root).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            DocError::MissingField { field: "type", .. }
        ));
    }

    #[test]
    fn test_lenient_config_keeps_valid_blocks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("vars");
        create_file(
            &root,
            "variables.tf",
            "variable \"good\" {\n  type = string\n}\n\nvariable \"bad\" {\n  description = \"no type\"\n}\n",
        );
        create_file(&root, CONFIG_FILENAME, "lenient: true\n");

        let config = ScanConfig::discover(&root).unwrap();
        let docs = Scanner::new(config).scan(&root).unwrap();

        assert_eq!(docs[0].variables.len(), 1);
        assert_eq!(docs[0].variables[0].name, "good");
    }
}

// ============================================================================
// Discovery
// ============================================================================

mod discovery {
    use super::*;

    #[test]
    fn test_list_module_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_file(root, "depth1/main.tf", "");
        create_file(root, "depth1/file.tf", "");
        create_file(root, "depth1/terraform.tfvars", "");

        let walker = ModuleWalker::default();
        assert_eq!(
            walker.list_module_files(&root.join("depth1")).unwrap(),
            vec!["file.tf", "main.tf"]
        );
    }

    #[test]
    fn test_custom_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_file(root, "stack/main.hcl", "");
        create_file(root, "stack/main.tf", "");

        let walker = ModuleWalker::new(ScanConfig {
            extensions: vec!["hcl".to_string()],
            ..Default::default()
        });
        assert_eq!(walker.list_module_files(&root.join("stack")).unwrap(), vec!["main.hcl"]);
    }

    #[test]
    fn test_locate_skips_terraform_cache() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_file(root, "live/main.tf", "");
        create_file(root, "live/.terraform/modules/vpc/main.tf", "");

        let modules = Scanner::default().locate(root).unwrap();
        assert_eq!(modules, vec![root.join("live")]);
    }
}
