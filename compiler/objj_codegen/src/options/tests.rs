use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_default_warns_about_everything() {
    let options = CompilerOptions::default();
    assert!(options.warns_about(WarningCategories::IMPLICIT_GLOBALS));
    assert!(options.warns_about(WarningCategories::DEBUGGER));
    assert!(!options.transform_named_function_to_assignment);
    assert_eq!(options.warning_limit, 0);
}

#[test]
fn test_disabling_a_category() {
    let options = CompilerOptions {
        warnings: WarningCategories::all() - WarningCategories::UNKNOWN_IDENTIFIERS,
        ..CompilerOptions::default()
    };
    assert!(!options.warns_about(WarningCategories::UNKNOWN_IDENTIFIERS));
    assert!(options.warns_about(WarningCategories::SHADOWED_IVARS));
}

#[test]
fn test_indent_unit() {
    assert_eq!(FormatOptions::default().indent_unit(), "    ");
    let tabs = FormatOptions {
        indent_string: "\t".to_string(),
        indent_width: 1,
    };
    assert_eq!(tabs.indent_unit(), "\t");
}

#[test]
fn test_plain_accessor_names() {
    let names = AccessorStyle::Plain.accessor_names("title", &Accessors::default());
    assert_eq!(names, ("title".to_string(), Some("setTitle:".to_string())));
}

#[test]
fn test_strip_underscore_accessor_names() {
    let names = AccessorStyle::StripUnderscore.accessor_names("_delegate", &Accessors::default());
    assert_eq!(names, ("delegate".to_string(), Some("setDelegate:".to_string())));
}

#[test]
fn test_explicit_accessor_attributes() {
    let accessors = Accessors {
        property: Some("enabled".to_string()),
        getter: Some("isEnabled".to_string()),
        ..Accessors::default()
    };
    let names = AccessorStyle::Plain.accessor_names("_on", &accessors);
    assert_eq!(names, ("isEnabled".to_string(), Some("setEnabled:".to_string())));
}

#[test]
fn test_readonly_has_no_setter() {
    let accessors = Accessors {
        readonly: true,
        ..Accessors::default()
    };
    let (getter, setter) = AccessorStyle::Plain.accessor_names("count", &accessors);
    assert_eq!(getter, "count");
    assert_eq!(setter, None);
}
