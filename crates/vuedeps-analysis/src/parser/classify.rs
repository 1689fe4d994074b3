//! Vue script-style classification.
//!
//! The rules are ordered heuristics with fixed tie-breaks:
//!
//! 1. a `<script setup>` block always means Composition API
//! 2. a multi-line `import { ... } from 'vue'` over the raw text can force
//!    Composition API before any stripping
//! 3. `functional: true` or a default-exported function means functional
//! 4. a class extending `Vue`/`Component` or `@Component` means class
//! 5. otherwise composition and options signals are weighed against each
//!    other
//!
//! Steps 3 to 5 read the script with comments and literals blanked.

use once_cell::sync::Lazy;
use regex::Regex;
use vuedeps_graph::{ImportStatement, ScriptType};

use super::strip::strip_comments_and_literals;

/// Reactivity and lifecycle APIs exported by `vue`.
const VUE_APIS: &[&str] = &[
    "ref",
    "reactive",
    "computed",
    "watch",
    "watchEffect",
    "readonly",
    "shallowRef",
    "shallowReactive",
    "toRef",
    "toRefs",
    "unref",
    "isRef",
    "provide",
    "inject",
    "nextTick",
    "onBeforeMount",
    "onMounted",
    "onBeforeUpdate",
    "onUpdated",
    "onBeforeUnmount",
    "onUnmounted",
    "onActivated",
    "onDeactivated",
    "onErrorCaptured",
];

/// Specifier count at which a multi-line `vue` import forces Composition API.
const MANY_VUE_IMPORTS: usize = 10;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("classification pattern is valid")
}

static VUE_IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| re(r#"import\s*\{(?P<names>[^}]*)\}\s*from\s*["']vue["']"#));
static RENDER_RE: Lazy<Regex> = Lazy::new(|| re(r"\brender\s*\("));

static DEFINE_COMPONENT_RE: Lazy<Regex> = Lazy::new(|| re(r"\bdefineComponent\s*\("));
static SETUP_RE: Lazy<Regex> = Lazy::new(|| re(r"\bsetup\s*[(:]"));
static DEFINE_ASYNC_RE: Lazy<Regex> = Lazy::new(|| re(r"\bdefineAsyncComponent\b"));
static COMPOSABLE_RE: Lazy<Regex> = Lazy::new(|| re(r"^use[A-Z]"));

static DATA_RE: Lazy<Regex> =
    Lazy::new(|| re(r"\bdata\s*(?:\(\s*\)|:\s*(?:function\b|\(\s*\)\s*=>))"));
static CORE_OPTION_RE: Lazy<Regex> = Lazy::new(|| re(r"\b(?:methods|computed|watch)\s*:"));
static LIGHT_OPTION_RE: Lazy<Regex> = Lazy::new(|| re(r"\b(?:props|emits|components)\s*:"));
static OTHER_OPTION_RE: Lazy<Regex> = Lazy::new(|| {
    re(concat!(
        r"\b(?:inject|mixins|extends|directives|filters|expose|model|inheritAttrs)\s*:",
        r"|\bprovide\s*[:(]",
    ))
});
static LIFECYCLE_RE: Lazy<Regex> = Lazy::new(|| {
    re(concat!(
        r"\b(?:beforeCreate|created|beforeMount|mounted|beforeUpdate|updated|",
        r"beforeDestroy|destroyed|beforeUnmount|unmounted|activated|deactivated|",
        r"errorCaptured|renderTracked|renderTriggered|serverPrefetch)\s*[(:]",
    ))
});

static FUNCTIONAL_FLAG_RE: Lazy<Regex> = Lazy::new(|| re(r"\bfunctional\s*:\s*true\b"));
static FUNCTION_DEFAULT_RE: Lazy<Regex> = Lazy::new(|| {
    re(concat!(
        r"\bexport\s+default\s+(?:async\s+)?",
        r"(?:function\b|\([^()]*\)\s*(?::[^=]*)?=>|[A-Za-z_$][\w$]*\s*=>)",
    ))
});
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    re(r"\bclass\b(?:\s+[A-Za-z_$][\w$]*)?\s+extends\s+(?:Vue|Component)\b|@Component\b")
});

/// Signals found in a script.
#[derive(Debug, Default, Clone, Copy)]
struct Signals {
    define_component: bool,
    setup: bool,
    define_async: bool,
    composable: bool,
    data: bool,
    core_options: bool,
    light_options: bool,
    other_options: bool,
}

impl Signals {
    fn scan(code: &str, imports: &[ImportStatement]) -> Self {
        let composable = imports.iter().any(|stmt| {
            stmt.default
                .iter()
                .chain(stmt.named.iter().map(|s| &s.imported))
                .any(|name| COMPOSABLE_RE.is_match(name))
        });

        Self {
            define_component: DEFINE_COMPONENT_RE.is_match(code),
            setup: SETUP_RE.is_match(code),
            define_async: DEFINE_ASYNC_RE.is_match(code),
            composable,
            data: DATA_RE.is_match(code),
            core_options: CORE_OPTION_RE.is_match(code),
            light_options: LIGHT_OPTION_RE.is_match(code),
            other_options: OTHER_OPTION_RE.is_match(code) || LIFECYCLE_RE.is_match(code),
        }
    }

    fn composition(&self) -> bool {
        self.define_component || self.setup || self.define_async || self.composable
    }

    fn options(&self) -> bool {
        self.data || self.core_options || self.light_options || self.other_options
    }

    fn resolve(&self) -> ScriptType {
        match (self.composition(), self.options()) {
            (true, true) => self.tie_break(),
            (true, false) => ScriptType::Composition,
            (false, true) => ScriptType::Options,
            (false, false) => ScriptType::Unknown,
        }
    }

    fn tie_break(&self) -> ScriptType {
        let heavy_options = self.data || self.core_options;

        if self.define_component && self.setup {
            ScriptType::Composition
        } else if self.define_async {
            ScriptType::Composition
        } else if self.setup {
            if heavy_options {
                ScriptType::Mixed
            } else {
                ScriptType::Composition
            }
        } else if self.define_component && !heavy_options && !self.other_options {
            // Only props/emits/components alongside defineComponent
            ScriptType::Composition
        } else {
            ScriptType::Mixed
        }
    }
}

/// Classify a component's script.
///
/// `script` is the raw content of the chosen block, `has_setup_block` tells
/// whether the component has a `<script setup>` block and `imports` are the
/// statements already extracted from `script`.
pub fn classify_script(
    script: &str,
    has_setup_block: bool,
    imports: &[ImportStatement],
) -> ScriptType {
    if has_setup_block || forces_composition(script) {
        return ScriptType::Composition;
    }

    let code = strip_comments_and_literals(script);

    if FUNCTIONAL_FLAG_RE.is_match(&code) || FUNCTION_DEFAULT_RE.is_match(&code) {
        return ScriptType::Functional;
    }
    if CLASS_RE.is_match(&code) {
        return ScriptType::Class;
    }

    Signals::scan(&code, imports).resolve()
}

/// Raw-text fallback: a multi-line `import { ... } from 'vue'` naming many
/// specifiers, or naming a reactivity/lifecycle API next to a `render()`.
fn forces_composition(raw: &str) -> bool {
    VUE_IMPORT_RE.captures_iter(raw).any(|caps| {
        let Some(names) = caps.name("names").map(|m| m.as_str()) else {
            return false;
        };
        if !names.contains('\n') {
            return false;
        }

        let imported: Vec<&str> = names
            .split(',')
            .filter_map(|entry| entry.split_whitespace().next())
            .collect();

        imported.len() >= MANY_VUE_IMPORTS
            || (imported.iter().any(|name| VUE_APIS.contains(name)) && RENDER_RE.is_match(raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::imports::extract_imports;
    use crate::parser::strip::strip_comments;

    fn classify(script: &str) -> ScriptType {
        let imports = extract_imports(&strip_comments(script), &strip_comments_and_literals(script));
        classify_script(script, false, &imports)
    }

    #[test]
    fn setup_block_is_always_composition() {
        assert_eq!(classify_script("", true, &[]), ScriptType::Composition);
        assert_eq!(
            classify_script("export default { data() { return {} } }", true, &[]),
            ScriptType::Composition
        );
    }

    #[test]
    fn plain_options_api() {
        let src = r#"
export default {
  name: 'Counter',
  props: { start: Number },
  data() { return { n: 0 } },
  methods: { inc() { this.n++ } },
  mounted() { this.inc() },
}
"#;
        assert_eq!(classify(src), ScriptType::Options);
    }

    #[test]
    fn lifecycle_hook_alone_is_options() {
        assert_eq!(classify("export default { created() {} }"), ScriptType::Options);
    }

    #[test]
    fn define_component_with_setup() {
        let src = r#"
import { defineComponent, ref } from 'vue'
export default defineComponent({
  props: { title: String },
  setup(props) { return { count: ref(0) } },
})
"#;
        assert_eq!(classify(src), ScriptType::Composition);
    }

    #[test]
    fn setup_with_data_is_mixed() {
        let src = r#"
export default {
  data() { return { a: 1 } },
  setup() { return {} },
}
"#;
        assert_eq!(classify(src), ScriptType::Mixed);
    }

    #[test]
    fn setup_with_only_light_options_is_composition() {
        let src = "export default { props: ['id'], emits: ['close'], setup(props) {} }";
        assert_eq!(classify(src), ScriptType::Composition);
    }

    #[test]
    fn define_async_component_beats_options() {
        let src = r#"
import { defineAsyncComponent } from 'vue'
export default {
  components: { Heavy: defineAsyncComponent(() => import('./Heavy.vue')) },
  data() { return {} },
  methods: {},
}
"#;
        assert_eq!(classify(src), ScriptType::Composition);
    }

    #[test]
    fn define_component_with_light_options_only() {
        let src = "export default defineComponent({ props: {}, emits: [], components: {} })";
        assert_eq!(classify(src), ScriptType::Composition);
    }

    #[test]
    fn define_component_with_methods_is_mixed() {
        let src = "export default defineComponent({ data() { return {} }, methods: {} })";
        assert_eq!(classify(src), ScriptType::Mixed);
    }

    #[test]
    fn composable_import_with_options_is_mixed() {
        let src = r#"
import { useStore } from 'vuex'
export default { computed: { user() { return useStore().user } } }
"#;
        assert_eq!(classify(src), ScriptType::Mixed);
    }

    #[test]
    fn composable_import_alone_is_composition() {
        let src = "import useMouse from '@/composables/mouse'\nexport default {}";
        assert_eq!(classify(src), ScriptType::Composition);
    }

    #[test]
    fn functional_components() {
        assert_eq!(
            classify("export default { functional: true, render(h) {} }"),
            ScriptType::Functional
        );
        assert_eq!(
            classify("export default function Hello(props) { return h('div') }"),
            ScriptType::Functional
        );
        assert_eq!(
            classify("export default (props, { slots }) => h('div', slots)"),
            ScriptType::Functional
        );
    }

    #[test]
    fn class_components() {
        let src = r#"
import { Component, Vue } from 'vue-property-decorator'
@Component
export default class Hello extends Vue {
  mounted() {}
}
"#;
        assert_eq!(classify(src), ScriptType::Class);
        assert_eq!(
            classify("export default class extends Vue {}"),
            ScriptType::Class
        );
    }

    #[test]
    fn signals_in_comments_and_strings_are_ignored() {
        let src = r#"
// methods: {} and data() would make this options
const help = "call setup() then defineComponent()"
export default {}
"#;
        assert_eq!(classify(src), ScriptType::Unknown);
    }

    #[test]
    fn empty_script_is_unknown() {
        assert_eq!(classify(""), ScriptType::Unknown);
    }

    #[test]
    fn many_vue_imports_force_composition() {
        let src = r#"
import {
  ref, reactive, computed, watch, watchEffect,
  onMounted, onUnmounted, toRefs, nextTick, provide,
} from 'vue'
export default { data() { return {} }, methods: {} }
"#;
        assert_eq!(classify(src), ScriptType::Composition);
    }

    #[test]
    fn vue_api_with_render_forces_composition() {
        let src = "import {\n  h,\n  ref\n} from 'vue'\nexport default { data() { return {} }, render() { return h('div') } }";
        assert_eq!(classify(src), ScriptType::Composition);
    }

    #[test]
    fn single_line_vue_import_does_not_force() {
        let src = "import { h, ref } from 'vue'\nexport default { data() { return {} }, render() { return h('div') } }";
        assert_eq!(classify(src), ScriptType::Options);
    }
}
