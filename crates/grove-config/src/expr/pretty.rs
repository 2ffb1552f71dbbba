//! Surface-syntax rendering of expressions and types.
//!
//! Short values stay on one line. Records and lists that do not fit in
//! `WIDTH` columns are broken one entry per line with leading separators:
//!
//! ```text
//! { dependencies = [ "console", "effect", "prelude" ]
//! , repo = "https://github.com/purescript/purescript-arrays.git"
//! , version = "v5.3.1"
//! }
//! ```
//!
//! Nothing is ever elided; the output is meant to be shown to users verbatim.

use super::{Expr, Fields, Type};

const WIDTH: usize = 80;

const RESERVED: &[&str] = &[
    "if", "then", "else", "let", "in", "as", "using", "merge", "missing", "Infinity", "NaN",
    "Some", "toMap", "assert", "forall", "with", "showConstructor", "Type", "Kind", "Sort",
];

/// A bracketed group that may be broken over several lines
pub(super) struct Block<'a, T> {
    open: char,
    close: char,
    /// `(head, child)`; `head` is `"label ="` for records and empty for lists
    entries: Vec<(String, &'a T)>,
}

pub(super) trait Layout: Sized {
    fn compact(&self) -> String;
    fn block(&self) -> Option<Block<'_, Self>>;
}

/// Layout tree built once per render, carrying the one-line width of every group
enum Doc {
    Atom(String),
    Group {
        open: char,
        close: char,
        entries: Vec<(String, Doc)>,
        width: usize,
    },
}

impl Doc {
    fn width(&self) -> usize {
        match self {
            Doc::Atom(text) => width(text),
            Doc::Group { width, .. } => *width,
        }
    }
}

pub(super) fn render<T: Layout>(node: &T) -> String {
    let mut out = String::new();
    write(&mut out, &layout(node), 0);
    out
}

fn layout<T: Layout>(node: &T) -> Doc {
    let Some(block) = node.block() else {
        return Doc::Atom(node.compact());
    };
    let entries: Vec<(String, Doc)> = block
        .entries
        .into_iter()
        .map(|(head, child)| (head, layout(child)))
        .collect();
    // "{ " + entries joined by ", " + " }"; a head is followed by a space
    let width = entries
        .iter()
        .map(|(head, child)| width(head) + usize::from(!head.is_empty()) + child.width())
        .sum::<usize>()
        + 2 * entries.len().saturating_sub(1)
        + 4;
    Doc::Group {
        open: block.open,
        close: block.close,
        entries,
        width,
    }
}

/// One-line rendering of a layout tree
fn flat(out: &mut String, doc: &Doc) {
    match doc {
        Doc::Atom(text) => out.push_str(text),
        Doc::Group {
            open,
            close,
            entries,
            ..
        } => {
            out.push(*open);
            for (i, (head, child)) in entries.iter().enumerate() {
                out.push_str(if i == 0 { " " } else { ", " });
                if !head.is_empty() {
                    out.push_str(head);
                    out.push(' ');
                }
                flat(out, child);
            }
            out.push(' ');
            out.push(*close);
        }
    }
}

fn write(out: &mut String, doc: &Doc, indent: usize) {
    let (open, close, entries) = match doc {
        Doc::Group {
            open,
            close,
            entries,
            width,
        } if indent + width > WIDTH => (*open, *close, entries),
        _ => {
            flat(out, doc);
            return;
        }
    };

    for (i, (head, child)) in entries.iter().enumerate() {
        if i == 0 {
            out.push(open);
            out.push(' ');
        } else {
            newline(out, indent);
            out.push_str(", ");
        }

        if head.is_empty() {
            write(out, child, indent + 2);
            continue;
        }

        out.push_str(head);
        if matches!(child, Doc::Atom(_)) || indent + 3 + width(head) + child.width() <= WIDTH {
            out.push(' ');
            flat(out, child);
        } else {
            newline(out, indent + 4);
            write(out, child, indent + 4);
        }
    }
    newline(out, indent);
    out.push(close);
}

fn newline(out: &mut String, indent: usize) {
    out.push('\n');
    out.extend(std::iter::repeat(' ').take(indent));
}

fn width(text: &str) -> usize {
    text.chars().count()
}

impl Layout for Expr {
    fn compact(&self) -> String {
        match self {
            Expr::Bool(true) => "True".to_string(),
            Expr::Bool(false) => "False".to_string(),
            Expr::Natural(n) => n.to_string(),
            Expr::Integer(i) if *i >= 0 => format!("+{}", i),
            Expr::Integer(i) => i.to_string(),
            Expr::Double(d) => double(*d),
            Expr::Text(text) => quote(text),
            Expr::List { items, annotation } if items.is_empty() => match annotation {
                Some(element) => format!("[] : {}", Type::list(element.clone()).compact()),
                None => "[]".to_string(),
            },
            Expr::List { items, .. } => {
                let items: Vec<String> = items.iter().map(Layout::compact).collect();
                format!("[ {} ]", items.join(", "))
            }
            Expr::Some(inner) => format!("Some {}", argument(inner)),
            Expr::None(Some(element)) => format!("None {}", type_argument(element)),
            Expr::None(None) => "None".to_string(),
            Expr::Record(fields) if fields.is_empty() => "{=}".to_string(),
            Expr::Record(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(label, value)| format!("{} = {}", label_text(label), value.compact()))
                    .collect();
                format!("{{ {} }}", fields.join(", "))
            }
            Expr::Union {
                alternatives,
                alternative,
                payload,
            } => {
                let constructor = format!("{}.{}", union_type(alternatives), label_text(alternative));
                match payload {
                    Some(payload) => format!("{} {}", constructor, argument(payload)),
                    None => constructor,
                }
            }
        }
    }

    fn block(&self) -> Option<Block<'_, Self>> {
        match self {
            Expr::List { items, .. } if !items.is_empty() => Some(Block {
                open: '[',
                close: ']',
                entries: items.iter().map(|item| (String::new(), item)).collect(),
            }),
            Expr::Record(fields) if !fields.is_empty() => Some(Block {
                open: '{',
                close: '}',
                entries: fields
                    .iter()
                    .map(|(label, value)| (format!("{} =", label_text(label)), value))
                    .collect(),
            }),
            _ => None,
        }
    }
}

impl Layout for Type {
    fn compact(&self) -> String {
        match self {
            Type::Bool => "Bool".to_string(),
            Type::Natural => "Natural".to_string(),
            Type::Integer => "Integer".to_string(),
            Type::Double => "Double".to_string(),
            Type::Text => "Text".to_string(),
            Type::List(element) => format!("List {}", type_argument(element)),
            Type::Optional(element) => format!("Optional {}", type_argument(element)),
            Type::Record(fields) if fields.is_empty() => "{}".to_string(),
            Type::Record(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|(label, ty)| format!("{} : {}", label_text(label), ty.compact()))
                    .collect();
                format!("{{ {} }}", fields.join(", "))
            }
            Type::Union(alternatives) => union_type(alternatives),
        }
    }

    fn block(&self) -> Option<Block<'_, Self>> {
        match self {
            Type::Record(fields) if !fields.is_empty() => Some(Block {
                open: '{',
                close: '}',
                entries: fields
                    .iter()
                    .map(|(label, ty)| (format!("{} :", label_text(label)), ty))
                    .collect(),
            }),
            _ => None,
        }
    }
}

/// An expression in argument position, parenthesized when it is itself an application
fn argument(expr: &Expr) -> String {
    match expr {
        Expr::Some(_)
        | Expr::None(Some(_))
        | Expr::Union {
            payload: Some(_), ..
        } => format!("({})", expr.compact()),
        Expr::List { items, annotation: Some(_) } if items.is_empty() => {
            format!("({})", expr.compact())
        }
        _ => expr.compact(),
    }
}

fn type_argument(ty: &Type) -> String {
    match ty {
        Type::List(_) | Type::Optional(_) => format!("({})", ty.compact()),
        _ => ty.compact(),
    }
}

fn union_type(alternatives: &Fields<Option<Type>>) -> String {
    if alternatives.is_empty() {
        return "<>".to_string();
    }
    let alternatives: Vec<String> = alternatives
        .iter()
        .map(|(label, ty)| match ty {
            Some(ty) => format!("{} : {}", label_text(label), ty.compact()),
            None => label_text(label),
        })
        .collect();
    format!("< {} >", alternatives.join(" | "))
}

fn double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:X}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn label_text(label: &str) -> String {
    let mut chars = label.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/'));
    if simple && !RESERVED.contains(&label) {
        label.to_string()
    } else {
        format!("`{}`", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(deps: &[&str], repo: &str, version: &str) -> Expr {
        let deps = if deps.is_empty() {
            Expr::empty_list(Type::Text)
        } else {
            Expr::list(deps.iter().map(|d| Expr::text(*d)).collect())
        };
        Expr::record([
            ("dependencies", deps),
            ("repo", Expr::text(repo)),
            ("version", Expr::text(version)),
        ])
    }

    #[test]
    fn test_scalars() {
        assert_eq!(Expr::Bool(true).to_string(), "True");
        assert_eq!(Expr::Natural(3).to_string(), "3");
        assert_eq!(Expr::Integer(3).to_string(), "+3");
        assert_eq!(Expr::Integer(-3).to_string(), "-3");
        assert_eq!(Expr::Double(1.0).to_string(), "1.0");
        assert_eq!(Expr::Double(0.25).to_string(), "0.25");
        assert_eq!(Expr::Double(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_text_escapes() {
        assert_eq!(Expr::text("a \"b\"").to_string(), r#""a \"b\"""#);
        assert_eq!(Expr::text("${x}\n").to_string(), r#""\${x}\n""#);
    }

    #[test]
    fn test_short_values_stay_on_one_line() {
        let expr = package(&[], "https://ex/r", "v1.0.0");
        assert_eq!(
            expr.to_string(),
            r#"{ dependencies = [] : List Text, repo = "https://ex/r", version = "v1.0.0" }"#
        );
        assert_eq!(Expr::Record(Default::default()).to_string(), "{=}");
        assert_eq!(Expr::list(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_long_records_break_one_field_per_line() {
        let expr = package(
            &["console", "effect", "prelude"],
            "https://github.com/purescript/purescript-arrays.git",
            "v5.3.1",
        );
        let expected = "\
{ dependencies = [ \"console\", \"effect\", \"prelude\" ]
, repo = \"https://github.com/purescript/purescript-arrays.git\"
, version = \"v5.3.1\"
}";
        assert_eq!(expr.to_string(), expected);
    }

    #[test]
    fn test_nested_records_indent() {
        let inner = package(
            &["console", "effect", "prelude"],
            "https://github.com/purescript/purescript-arrays.git",
            "v5.3.1",
        );
        let expr = Expr::record([("arrays", inner)]);
        let expected = "\
{ arrays =
    { dependencies = [ \"console\", \"effect\", \"prelude\" ]
    , repo = \"https://github.com/purescript/purescript-arrays.git\"
    , version = \"v5.3.1\"
    }
}";
        assert_eq!(expr.to_string(), expected);
    }

    #[test]
    fn test_optionals_and_labels() {
        assert_eq!(Expr::Some(Box::new(Expr::Natural(1))).to_string(), "Some 1");
        assert_eq!(
            Expr::Some(Box::new(Expr::None(Some(Type::Text)))).to_string(),
            "Some (None Text)"
        );
        assert_eq!(Expr::None(Some(Type::list(Type::Text))).to_string(), "None (List Text)");
        assert_eq!(
            Expr::record([("if", Expr::Bool(false)), ("my pkg", Expr::Natural(1))]).to_string(),
            "{ `if` = False, `my pkg` = 1 }"
        );
    }

    #[test]
    fn test_types() {
        let ty = Type::record([
            ("dependencies", Type::list(Type::Text)),
            ("repo", Type::Text),
            ("version", Type::Text),
        ]);
        assert_eq!(ty.to_string(), "{ dependencies : List Text, repo : Text, version : Text }");
        assert_eq!(Type::list(Type::optional(Type::Natural)).to_string(), "List (Optional Natural)");
        assert_eq!(Type::record(Vec::<(String, Type)>::new()).to_string(), "{}");
    }

    #[test]
    fn test_unions() {
        let alternatives: Fields<Option<Type>> =
            [("Branch".to_string(), Some(Type::Text)), ("Latest".to_string(), None)]
                .into_iter()
                .collect();
        let latest = Expr::Union {
            alternatives: alternatives.clone(),
            alternative: "Latest".to_string(),
            payload: None,
        };
        assert_eq!(latest.to_string(), "< Branch : Text | Latest >.Latest");

        let branch = Expr::Union {
            alternatives: alternatives.clone(),
            alternative: "Branch".to_string(),
            payload: Some(Box::new(Expr::text("main"))),
        };
        assert_eq!(branch.to_string(), r#"< Branch : Text | Latest >.Branch "main""#);
        assert_eq!(
            Expr::Some(Box::new(branch)).to_string(),
            r#"Some (< Branch : Text | Latest >.Branch "main")"#
        );
        assert_eq!(Type::Union(Fields::new()).to_string(), "<>");
    }

    #[test]
    fn test_layout_widths_match_one_line_rendering() {
        let samples = vec![
            package(&[], "https://ex/r", "v1.0.0"),
            package(&["a", "b"], "https://github.com/purescript/purescript-arrays.git", "v5.3.1"),
            Expr::list(vec![Expr::record([("x", Expr::list(vec![Expr::Natural(1)]))])]),
            Expr::record([("if", Expr::Some(Box::new(Expr::record([("a", Expr::Bool(true))]))))]),
        ];
        for expr in samples {
            let doc = layout(&expr);
            let mut line = String::new();
            flat(&mut line, &doc);
            assert_eq!(line, expr.compact());
            assert_eq!(doc.width(), width(&line));
        }
    }

    #[test]
    fn test_deeply_nested_records() {
        let mut expr = Expr::text("https://github.com/purescript/purescript-prelude.git");
        for depth in 0..200 {
            expr = Expr::record([(format!("level{}", depth), expr)]);
        }
        let rendered = expr.to_string();
        assert!(rendered.starts_with("{ level199 =\n    { level198 ="));
        assert!(rendered.contains("purescript-prelude.git"));
        assert!(rendered.ends_with("\n}"));
    }
}
