pub const VERSION: &str = env!("BUILD_VERSION");

// Name printed at the top of every generated script
pub const BANNER_NAME: &str = "THG";

// ===== CHECK DURATION =====

// A check without explicit sustain is evaluated on the next cycle only
pub const DEFAULT_SUSTAIN: i64 = 1;
// Remaining count of a check that never expires
// It stays active until explicitly cancelled
pub const SUSTAIN_FOREVER: i64 = -1;
// Scenario keyword for an unlimited sustain
pub const SUSTAIN_FOREVER_KEYWORD: &str = "forever";

// ===== SCENARIO VALUES =====

// Deepest nesting of groups accepted in a scenario literal
pub const MAX_VALUE_DEPTH: usize = 128;

// ===== TOLERANCE =====

// Exact comparison when nothing else is configured
pub const DEFAULT_TOLERANCE: f64 = 0.0;
// Suffixes marking a relative tolerance in scenario text ("0.1r", "0.1%")
pub const RELATIVE_TOLERANCE_SUFFIXES: [char; 2] = ['r', '%'];

// ===== GENERATED SCRIPTS =====

// Runtime class used by generated scripts, as `module.Class`
pub const DEFAULT_RUNTIME_CLASS: &str = "thg.runtime.Thgrt";
// Variable holding the operator instance in generated scripts
pub const ROOT_INSTANCE: &str = "root";
// Variable holding the runtime instance in generated scripts
pub const RUNTIME_INSTANCE: &str = "thgrt";
// File listing the scripts produced for a procedure
pub const STATUS_FILE_NAME: &str = "thg_files.txt";
// Extension of generated scripts
pub const SCRIPT_EXTENSION: &str = "py";

// Full banner line, `THG <version>`
pub fn banner() -> String {
    format!("{} {}", BANNER_NAME, VERSION)
}
