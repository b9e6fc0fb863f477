use crate::models::{ImportStatement, ImportType};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Prints every builtin and stdlib top-level module name, one per line.
const PROBE_PROGRAM: &str = "import sys; \
print('\\n'.join(sorted(set(sys.builtin_module_names) | set(getattr(sys, 'stdlib_module_names', ())))))";

#[derive(Error, Debug)]
pub enum UniverseError {
    #[error("Failed to start interpreter {interpreter}: {source}")]
    Spawn {
        interpreter: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Interpreter {interpreter} exited with {status}: {stderr}")]
    ProbeFailed {
        interpreter: PathBuf,
        status: String,
        stderr: String,
    },
    #[error("Interpreter produced non UTF-8 output: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}

/// Module names importable without installing anything
#[derive(Debug, Clone)]
pub struct ModuleUniverse {
    modules: HashSet<String>,
}

impl ModuleUniverse {
    /// The bundled table of CPython stdlib and builtin module names
    pub fn bundled() -> Self {
        Self {
            modules: Self::python_stdlib_modules(),
        }
    }

    /// The bundled table extended with whatever `interpreter` reports as
    /// builtin or stdlib.
    pub fn probe(interpreter: &Path) -> Result<Self, UniverseError> {
        let output = Command::new(interpreter)
            .args(["-I", "-c", PROBE_PROGRAM])
            .output()
            .map_err(|source| UniverseError::Spawn {
                interpreter: interpreter.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(UniverseError::ProbeFailed {
                interpreter: interpreter.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)?;
        let mut universe = Self::bundled();
        universe.extend(parse_probe_output(&stdout));
        Ok(universe)
    }

    /// Probe `interpreter` if given, otherwise use the bundled table
    pub fn for_interpreter(interpreter: Option<&Path>) -> Result<Self, UniverseError> {
        match interpreter {
            Some(path) => Self::probe(path),
            None => Ok(Self::bundled()),
        }
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, names: I) {
        self.modules.extend(names);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Categorize an import by its top-level module name
    pub fn categorize(&self, import: &ImportStatement) -> ImportType {
        match import.top_level_name() {
            None => ImportType::Local,
            Some(name) if self.contains(name) => ImportType::Stdlib,
            Some(_) => ImportType::External,
        }
    }

    /// Python standard library and builtin modules
    fn python_stdlib_modules() -> HashSet<String> {
        [
            // A-B
            "abc", "aifc", "antigravity", "argparse", "array", "ast", "asynchat",
            "asyncio", "asyncore", "atexit", "audioop", "base64", "bdb", "binascii",
            "binhex", "bisect", "builtins", "bz2",
            // C
            "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd", "code", "codecs",
            "codeop", "collections", "colorsys", "compileall", "concurrent",
            "configparser", "contextlib", "contextvars", "copy", "copyreg",
            "cProfile", "crypt", "csv", "ctypes", "curses",
            // D-E
            "dataclasses", "datetime", "dbm", "decimal", "difflib", "dis",
            "distutils", "doctest", "dummy_threading", "email", "encodings",
            "ensurepip", "enum", "errno",
            // F-G
            "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch", "formatter",
            "fractions", "ftplib", "functools", "gc", "genericpath", "getopt",
            "getpass", "gettext", "glob", "graphlib", "grp", "gzip",
            // H-I
            "hashlib", "heapq", "hmac", "html", "http", "idlelib", "imaplib",
            "imghdr", "imp", "importlib", "inspect", "io", "ipaddress", "itertools",
            // J-L
            "json", "keyword", "lib2to3", "linecache", "locale", "logging", "lzma",
            // M-N
            "macpath", "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap",
            "modulefinder", "msilib", "msvcrt", "multiprocessing", "netrc", "nis",
            "nntplib", "nt", "ntpath", "nturl2path", "numbers",
            // O-P
            "opcode", "operator", "optparse", "os", "ossaudiodev", "parser",
            "pathlib", "pdb", "pickle", "pickletools", "pipes", "pkgutil",
            "platform", "plistlib", "poplib", "posix", "posixpath", "pprint",
            "profile", "pstats", "pty", "pwd", "py_compile", "pyclbr", "pydoc",
            "pydoc_data", "pyexpat",
            // Q-R
            "queue", "quopri", "random", "re", "readline", "reprlib", "resource",
            "rlcompleter", "runpy",
            // S
            "sched", "secrets", "select", "selectors", "shelve", "shlex", "shutil",
            "signal", "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver",
            "spwd", "sqlite3", "sre_compile", "sre_constants", "sre_parse", "ssl",
            "stat", "statistics", "string", "stringprep", "struct", "subprocess",
            "sunau", "symbol", "symtable", "sys", "sysconfig", "syslog",
            // T
            "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "test",
            "textwrap", "this", "threading", "time", "timeit", "tkinter", "token",
            "tokenize", "tomllib", "trace", "traceback", "tracemalloc", "tty",
            "turtle", "turtledemo", "types", "typing",
            // U-Z
            "unicodedata", "unittest", "urllib", "uu", "uuid", "venv", "warnings",
            "wave", "weakref", "webbrowser", "winreg", "winsound", "wsgiref",
            "xdrlib", "xml", "xmlrpc", "xxsubtype", "zipapp", "zipfile", "zipimport",
            "zlib", "zoneinfo",
            // Underscore prefixed builtins
            "__future__", "__main__", "_abc", "_ast", "_asyncio", "_bisect",
            "_blake2", "_bz2", "_codecs", "_collections", "_collections_abc",
            "_compression", "_contextvars", "_csv", "_ctypes", "_datetime",
            "_decimal", "_dummy_thread", "_frozen_importlib",
            "_frozen_importlib_external", "_functools", "_hashlib", "_heapq",
            "_imp", "_io", "_json", "_locale", "_lzma", "_markupbase", "_md5",
            "_operator", "_pickle", "_posixsubprocess", "_pydecimal", "_pyio",
            "_queue", "_random", "_sha1", "_sha256", "_sha3", "_sha512", "_signal",
            "_sitebuiltins", "_socket", "_sqlite3", "_sre", "_ssl", "_stat",
            "_string", "_strptime", "_struct", "_thread", "_threading_local",
            "_tracemalloc", "_typing", "_uuid", "_warnings", "_weakref",
            "_weakrefset", "_winapi", "_zoneinfo",
            // Private extension and helper modules
            "_aix_support", "_bootsubprocess", "_codecs_cn", "_codecs_hk",
            "_codecs_iso2022", "_codecs_jp", "_codecs_kr", "_codecs_tw",
            "_compat_pickle", "_crypt", "_curses", "_curses_panel", "_dbm",
            "_elementtree", "_gdbm", "_lsprof", "_msi", "_multibytecodec",
            "_multiprocessing", "_opcode", "_osx_support", "_overlapped",
            "_posixshmem", "_py_abc", "_scproxy", "_statistics", "_symtable",
            "_tkinter", "_tokenize",
            // Added in 3.12 and 3.13
            "_android_support", "_colorize", "_interpchannels", "_interpqueues",
            "_interpreters", "_ios_support", "_opcode_metadata", "_pydatetime",
            "_pylong", "_pyrepl", "_suggestions", "_sysconfig", "_wmi",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

impl Default for ModuleUniverse {
    fn default() -> Self {
        Self::bundled()
    }
}

fn parse_probe_output(stdout: &str) -> impl Iterator<Item = String> + '_ {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
}
