//! Dart Renderer
//!
//! Emits the constant holder class and the status lookup function.

use std::fmt::Write as FmtWrite;
use zxconst_core::{ConstantSet, GeneratorConfig};

const COPYRIGHT: &str = "\
// Copyright 2017 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.";

/// Renders a `ConstantSet` as Dart source
pub struct DartRenderer {
    class_name: String,
    library: String,
    lookup_function: String,
    output: String,
    indent: usize,
}

impl DartRenderer {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            class_name: config.class_name.clone(),
            library: config.library.clone(),
            lookup_function: config.lookup_function.clone(),
            output: String::new(),
            indent: 0,
        }
    }

    fn writeln(&mut self, s: &str) {
        if s.is_empty() {
            self.output.push('\n');
            return;
        }
        let indent = "  ".repeat(self.indent);
        let _ = writeln!(self.output, "{indent}{s}");
    }

    /// Render the whole file
    pub fn render(&mut self, constants: &ConstantSet) -> String {
        self.output.clear();
        self.indent = 0;

        self.write_header();
        self.writeln("");
        self.write_class(constants);
        self.writeln("");
        self.write_lookup(constants);

        std::mem::take(&mut self.output)
    }

    fn write_header(&mut self) {
        self.writeln(COPYRIGHT);
        self.writeln("");
        self.writeln(&format!("part of {};", self.library));
        self.writeln("");
        self.writeln("// This is autogenerated from Zircon headers. Do not edit directly.");
        self.writeln("// Generated by zxconst.");
        self.writeln("");
        self.writeln("// ignore_for_file: constant_identifier_names");
    }

    /// Non-instantiable holder: abstract with a private constructor
    fn write_class(&mut self, constants: &ConstantSet) {
        let class = self.class_name.clone();
        self.writeln(&format!("abstract class {class} {{"));
        self.indent += 1;
        self.writeln(&format!("{class}._();"));
        for constant in constants.iter() {
            self.writeln(&format!(
                "static const int {} = {};",
                constant.name, constant.value
            ));
        }
        self.indent -= 1;
        self.writeln("}");
    }

    /// Lookup covers the errors header only
    fn write_lookup(&mut self, constants: &ConstantSet) {
        let class = self.class_name.clone();
        self.writeln(&format!("String {}(int status) {{", self.lookup_function));
        self.indent += 1;
        self.writeln("switch (status) {");
        self.indent += 1;
        for constant in &constants.errors {
            self.writeln(&format!("case {class}.{}:", constant.name));
            self.indent += 1;
            self.writeln(&format!("return \"{}\";", constant.name));
            self.indent -= 1;
        }
        self.writeln("default:");
        self.indent += 1;
        self.writeln("return \"(unknown: $status)\";");
        self.indent -= 2;
        self.writeln("}");
        self.indent -= 1;
        self.writeln("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zxconst_core::RenderedConstant;

    fn sample() -> ConstantSet {
        ConstantSet {
            errors: vec![
                RenderedConstant::new("OK", "0"),
                RenderedConstant::new("ERR_BAD_STATE", "-1"),
            ],
            types: vec![RenderedConstant::new("HANDLE_INVALID", "0")],
        }
    }

    #[test]
    fn test_render_full_file() {
        let mut renderer = DartRenderer::new(&GeneratorConfig::default());
        let dart = renderer.render(&sample());

        let expected = r#"// Copyright 2017 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

part of zircon;

// This is autogenerated from Zircon headers. Do not edit directly.
// Generated by zxconst.

// ignore_for_file: constant_identifier_names

abstract class ZX {
  ZX._();
  static const int OK = 0;
  static const int ERR_BAD_STATE = -1;
  static const int HANDLE_INVALID = 0;
}

String getStringForStatus(int status) {
  switch (status) {
    case ZX.OK:
      return "OK";
    case ZX.ERR_BAD_STATE:
      return "ERR_BAD_STATE";
    default:
      return "(unknown: $status)";
  }
}
"#;
        assert_eq!(dart, expected);
    }

    #[test]
    fn test_types_not_in_lookup() {
        let mut renderer = DartRenderer::new(&GeneratorConfig::default());
        let dart = renderer.render(&sample());
        assert!(dart.contains("static const int HANDLE_INVALID = 0;"));
        assert!(!dart.contains("case ZX.HANDLE_INVALID"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut renderer = DartRenderer::new(&GeneratorConfig::default());
        let first = renderer.render(&sample());
        let second = renderer.render(&sample());
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_names() {
        let config = GeneratorConfig {
            class_name: "Status".into(),
            library: "fuchsia".into(),
            lookup_function: "statusName".into(),
            ..GeneratorConfig::default()
        };
        let dart = DartRenderer::new(&config).render(&sample());

        assert!(dart.contains("part of fuchsia;"));
        assert!(dart.contains("abstract class Status {\n  Status._();"));
        assert!(dart.contains("String statusName(int status) {"));
        assert!(dart.contains("    case Status.OK:\n      return \"OK\";"));
    }

    #[test]
    fn test_empty_set() {
        let dart = DartRenderer::new(&GeneratorConfig::default()).render(&ConstantSet::default());
        assert!(dart.contains("abstract class ZX {\n  ZX._();\n}"));
        assert!(dart.contains("  switch (status) {\n    default:"));
    }
}
