//! The built-in schema for deep learning project configurations.
//!
//! Each section below is stored as `<section>.yaml` in a project's
//! configuration directory. Adding an option means adding an entry here with
//! its type and default, and optionally an example value for templates.

use std::sync::{Arc, OnceLock};

use super::{Branch, DType, LeafSpec, Schema, SchemaNode, WILDCARD};
use crate::namespace::{Namespace, Value};

/// Version of the built-in schema. Bump when sections or keys change.
pub const SCHEMA_VERSION: u32 = 1;

/// Returns the process-wide built-in schema.
///
/// The schema is constructed on first use and shared afterwards.
///
/// # Examples
///
/// ```
/// let schema = deepcfg::schema::builtin();
/// assert!(schema.section("losses").is_some());
/// assert_eq!(schema.version(), deepcfg::schema::SCHEMA_VERSION);
/// ```
#[must_use]
pub fn builtin() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();
    Arc::clone(SCHEMA.get_or_init(|| Arc::new(build())))
}

fn build() -> Schema {
    Schema::new(
        SCHEMA_VERSION,
        Branch::new()
            .entry("project", project())
            .entry("model", model())
            .entry("training", training())
            .entry("data", data())
            .entry("transform", transform())
            .entry("optimizer", optimizer())
            .entry("metrics", metrics())
            .entry("losses", losses())
            .entry("history", history()),
    )
}

fn str_leaf(default: impl Into<Value>) -> LeafSpec {
    LeafSpec::new(DType::Str, default)
}

fn bool_leaf(default: bool) -> LeafSpec {
    LeafSpec::new(DType::Bool, default)
}

fn dict_leaf() -> LeafSpec {
    LeafSpec::new(DType::Dict, Value::empty_map())
}

fn str_list_leaf() -> LeafSpec {
    LeafSpec::new(DType::list(DType::Str), Value::Null)
}

fn project() -> Branch {
    Branch::new()
        .entry("session", str_leaf("version01"))
        .entry("enable_log", bool_leaf(true))
        .entry("cv_library", str_leaf("opencv"))
        .entry("device", str_leaf("auto"))
        .entry("device_ids", LeafSpec::new(DType::list(DType::Int), "auto"))
        .entry("on_wake", str_list_leaf().init(vec![Value::from("train")]))
        .entry(
            "imports",
            str_list_leaf().init(vec![Value::from("numpy as np")]),
        )
}

fn model() -> Branch {
    Branch::new()
        .entry("name", str_leaf("LeNet"))
        .entry(
            "module",
            str_leaf(Value::Null).init("deeplodocus.app.models.lenet"),
        )
        .entry("epoch", LeafSpec::new(DType::Int, Value::Null))
        .entry("from_file", bool_leaf(false))
        .entry("file", str_leaf(Value::Null))
        .entry(
            "input_size",
            LeafSpec::new(DType::list(DType::list(DType::Int)), Value::Null).init(vec![
                Value::from(vec![Value::from(1), Value::from(28), Value::from(28)]),
            ]),
        )
        .entry("kwargs", dict_leaf())
}

fn training() -> Branch {
    let scheduler_kwargs: Namespace = [("gamma", 0.95)].into_iter().collect();

    Branch::new()
        .entry("verbose", str_leaf("epoch"))
        .entry("num_epochs", LeafSpec::new(DType::Int, 10))
        .entry("shuffle", str_leaf("default"))
        .entry("accumulate", LeafSpec::new(DType::Int, 1))
        .entry("enable_metrics", bool_leaf(true))
        .entry(
            "scheduler",
            Branch::new()
                .entry("name", str_leaf(Value::Null).init("ExponentialLR"))
                .entry(
                    "module",
                    str_leaf(Value::Null).init("torch.optim.lr_scheduler"),
                )
                .entry("enabled", bool_leaf(false).init(true))
                .entry("kwargs", dict_leaf().init(scheduler_kwargs)),
        )
        .entry(
            "saver",
            Branch::new()
                .entry("method", str_leaf("pytorch"))
                .entry("save_signal", str_leaf("auto"))
                .entry("overwrite", bool_leaf(false)),
        )
        .entry(
            "overwatch",
            Branch::new()
                .entry("metric", str_leaf("Total Loss"))
                .entry("condition", str_leaf("less"))
                .entry("dataset", str_leaf("validation")),
        )
}

fn data() -> Branch {
    let source_kwargs: Namespace = [
        ("root", Value::from("./MNIST")),
        ("train", Value::from(true)),
        ("download", Value::from(true)),
    ]
    .into_iter()
    .collect();

    let source = Branch::new()
        .entry("name", str_leaf("MNIST"))
        .entry("module", str_leaf(Value::Null).init("torchvision.datasets"))
        .entry("kwargs", dict_leaf().init(source_kwargs));

    let entry = Branch::new()
        .entry("name", str_leaf("Data Entry").init("MNIST Image"))
        .entry("type", str_leaf("input"))
        .entry("data_type", str_leaf("image"))
        .entry("load_as", str_leaf("float32"))
        .entry("move_axis", LeafSpec::new(DType::list(DType::Int), Value::Null))
        .entry("enable_cache", bool_leaf(false))
        .entry("sources", SchemaNode::sequence(source));

    let dataset = Branch::new()
        .entry("name", str_leaf("Dataset").init("Train MNIST"))
        .entry("type", str_leaf("train"))
        .entry("num_instances", LeafSpec::new(DType::Int, Value::Null))
        .entry("batch_size", LeafSpec::new(DType::Int, 1))
        .entry("entries", SchemaNode::sequence(entry));

    Branch::new()
        .entry(
            "dataloader",
            Branch::new().entry("num_workers", LeafSpec::new(DType::Int, 1)),
        )
        .entry(
            "enabled",
            Branch::new()
                .entry("train", bool_leaf(false).init(true))
                .entry("validation", bool_leaf(false))
                .entry("test", bool_leaf(false))
                .entry("prediction", bool_leaf(false)),
        )
        .entry("datasets", SchemaNode::sequence(dataset))
}

fn transform_manager(name: &str, labels: bool, example_inputs: bool) -> Branch {
    let inputs = if example_inputs {
        str_list_leaf().init(vec![Value::from("config/transformers/input.yaml")])
    } else {
        str_list_leaf()
    };
    let mut manager = Branch::new()
        .entry("name", str_leaf(name))
        .entry("inputs", inputs);
    if labels {
        manager = manager.entry("labels", str_list_leaf());
    }
    manager
        .entry("additional_data", str_list_leaf())
        .entry("outputs", str_list_leaf())
}

fn transform() -> Branch {
    Branch::new()
        .entry(
            "train",
            transform_manager("Train Transform Manager", true, true),
        )
        .entry(
            "validation",
            transform_manager("Validation Transform Manager", true, true),
        )
        .entry(
            "test",
            transform_manager("Test Transform Manager", true, false),
        )
        .entry(
            "prediction",
            transform_manager("Predict Transform Manager", false, false),
        )
}

fn optimizer() -> Branch {
    Branch::new()
        .entry("name", str_leaf("Adam"))
        .entry("module", str_leaf(Value::Null).init("torch.optim"))
        .entry("kwargs", dict_leaf())
        .entry("param_groups", LeafSpec::opaque(Value::Null))
}

fn metrics() -> Branch {
    Branch::new()
        .entry(
            WILDCARD,
            Branch::new()
                .entry("name", str_leaf("accuracy"))
                .entry("module", str_leaf(Value::Null))
                .entry("reduce", str_leaf("mean"))
                .entry("ignore_value", LeafSpec::new(DType::Float, Value::Null))
                .entry("kwargs", dict_leaf()),
        )
        .placeholder("accuracy")
}

fn losses() -> Branch {
    Branch::new()
        .entry(
            WILDCARD,
            Branch::new()
                .entry("name", str_leaf("CrossEntropyLoss"))
                .entry(
                    "module",
                    str_leaf(Value::Null).init("torch.nn.modules.loss"),
                )
                .entry("weight", LeafSpec::new(DType::Float, 1.0))
                .entry("kwargs", dict_leaf()),
        )
        .placeholder("loss")
}

fn history() -> Branch {
    Branch::new().entry(
        "enabled",
        Branch::new()
            .entry("train_batches", bool_leaf(true))
            .entry("train_epochs", bool_leaf(true))
            .entry("validation", bool_leaf(true)),
    )
}
