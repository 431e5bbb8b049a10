//! Built-in themes, following the highlight.js stylesheets of the same name.

use crate::color::Color;
use crate::style::StyleAttributes;
use crate::theme::Theme;

/// Names accepted by [`lookup`].
pub(crate) const NAMES: &[&str] = &["github", "atom-one-dark"];

type RuleTable = &'static [(&'static [&'static str], StyleAttributes)];

#[allow(clippy::cast_possible_truncation)]
const fn hex(rgb: u32) -> Color {
    Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

const GITHUB: RuleTable = &[
    (
        &["hljs"],
        StyleAttributes::fg(hex(0x24_29_2e)).with_background(hex(0xff_ff_ff)),
    ),
    (
        &[
            "hljs-doctag",
            "hljs-keyword",
            "hljs-template-tag",
            "hljs-template-variable",
            "hljs-type",
        ],
        StyleAttributes::fg(hex(0xd7_3a_49)),
    ),
    (
        &["hljs-title"],
        StyleAttributes::fg(hex(0x6f_42_c1)),
    ),
    (
        &[
            "hljs-attr",
            "hljs-attribute",
            "hljs-literal",
            "hljs-meta",
            "hljs-number",
            "hljs-operator",
            "hljs-variable",
            "hljs-selector-attr",
            "hljs-selector-class",
            "hljs-selector-id",
        ],
        StyleAttributes::fg(hex(0x00_5c_c5)),
    ),
    (
        &["hljs-regexp", "hljs-string"],
        StyleAttributes::fg(hex(0x03_2f_62)),
    ),
    (
        &["hljs-built_in", "hljs-symbol"],
        StyleAttributes::fg(hex(0xe3_62_09)),
    ),
    (
        &["hljs-comment", "hljs-code", "hljs-formula"],
        StyleAttributes::fg(hex(0x6a_73_7d)),
    ),
    (
        &["hljs-name", "hljs-quote", "hljs-selector-tag", "hljs-selector-pseudo", "hljs-tag"],
        StyleAttributes::fg(hex(0x22_86_3a)),
    ),
    (&["hljs-subst"], StyleAttributes::fg(hex(0x24_29_2e))),
    (
        &["hljs-section"],
        StyleAttributes::fg(hex(0x00_5c_c5)).bold(),
    ),
    (&["hljs-bullet"], StyleAttributes::fg(hex(0x73_5c_0f))),
    (
        &["hljs-emphasis"],
        StyleAttributes::fg(hex(0x24_29_2e)).italic(),
    ),
    (
        &["hljs-strong"],
        StyleAttributes::fg(hex(0x24_29_2e)).bold(),
    ),
    (
        &["hljs-addition"],
        StyleAttributes::fg(hex(0x22_86_3a)).with_background(hex(0xf0_ff_f4)),
    ),
    (
        &["hljs-deletion"],
        StyleAttributes::fg(hex(0xb3_1d_28))
            .with_background(hex(0xff_ee_f0))
            .struck(),
    ),
    (
        &["hljs-link"],
        StyleAttributes::fg(hex(0x03_2f_62)).underlined(),
    ),
];

const ATOM_ONE_DARK: RuleTable = &[
    (
        &["hljs"],
        StyleAttributes::fg(hex(0xab_b2_bf)).with_background(hex(0x28_2c_34)),
    ),
    (
        &["hljs-comment", "hljs-quote"],
        StyleAttributes::fg(hex(0x5c_63_70)).italic(),
    ),
    (
        &["hljs-doctag", "hljs-keyword", "hljs-formula"],
        StyleAttributes::fg(hex(0xc6_78_dd)),
    ),
    (
        &[
            "hljs-section",
            "hljs-name",
            "hljs-selector-tag",
            "hljs-deletion",
            "hljs-subst",
            "hljs-tag",
        ],
        StyleAttributes::fg(hex(0xe0_6c_75)),
    ),
    (&["hljs-literal"], StyleAttributes::fg(hex(0x56_b6_c2))),
    (
        &["hljs-string", "hljs-regexp", "hljs-addition", "hljs-attribute", "hljs-code"],
        StyleAttributes::fg(hex(0x98_c3_79)),
    ),
    (
        &[
            "hljs-attr",
            "hljs-variable",
            "hljs-template-variable",
            "hljs-type",
            "hljs-selector-class",
            "hljs-selector-attr",
            "hljs-selector-pseudo",
            "hljs-number",
        ],
        StyleAttributes::fg(hex(0xd1_9a_66)),
    ),
    (
        &["hljs-symbol", "hljs-bullet", "hljs-meta", "hljs-selector-id", "hljs-title"],
        StyleAttributes::fg(hex(0x61_ae_ee)),
    ),
    (
        &["hljs-link"],
        StyleAttributes::fg(hex(0x61_ae_ee)).underlined(),
    ),
    (&["hljs-built_in"], StyleAttributes::fg(hex(0xe6_c0_7b))),
    (&["hljs-emphasis"], StyleAttributes::new().italic()),
    (&["hljs-strong"], StyleAttributes::new().bold()),
];

fn build(name: &str, table: RuleTable) -> Theme {
    table
        .iter()
        .flat_map(|(classes, attrs)| classes.iter().map(move |class| (*class, *attrs)))
        .fold(Theme::new(name), |theme, (class, attrs)| {
            theme.with_rule(class, attrs)
        })
}

/// The `github` light theme.
pub(crate) fn github() -> Theme {
    build("github", GITHUB)
}

/// The `atom-one-dark` theme.
pub(crate) fn atom_one_dark() -> Theme {
    build("atom-one-dark", ATOM_ONE_DARK)
}

/// Look up a built-in theme by name.
pub(crate) fn lookup(name: &str) -> Option<Theme> {
    match name {
        "github" => Some(github()),
        "atom-one-dark" => Some(atom_one_dark()),
        _ => None,
    }
}
