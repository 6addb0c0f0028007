//! Column definition flags (spec §4.3.2 `ColumnDefinition`).
//!
//! https://mariadb.com/kb/en/library/resultset/#field-detail-flag

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldFlags: u16 {
        /// Field cannot be NULL.
        const NOT_NULL = 1;
        /// Field is part of a primary key.
        const PRIMARY_KEY = 2;
        /// Field is part of a unique key/constraint.
        const UNIQUE_KEY = 4;
        /// Field is part of a non-unique key.
        const MULTIPLE_KEY = 8;
        /// Field is a blob.
        const BLOB = 16;
        /// Field is unsigned.
        const UNSIGNED = 32;
        /// Field is zero-filled.
        const ZEROFILL = 64;
        /// Field is binary.
        const BINARY = 128;
        /// Field is an enumeration.
        const ENUM = 256;
        /// Field is auto-increment.
        const AUTO_INCREMENT = 512;
        /// Field is a timestamp.
        const TIMESTAMP = 1024;
        /// Field is a set.
        const SET = 2048;
        /// Field has no default value.
        const NO_DEFAULT_VALUE = 4096;
        /// Field is set to NOW() on UPDATE.
        const ON_UPDATE_NOW = 8192;
        /// Field is a number.
        const NUM = 32768;
    }
}
