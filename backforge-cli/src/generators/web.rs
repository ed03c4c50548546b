//! Server-rendered web applications (Express + EJS)

use super::Blueprint;

/// Express with EJS views and a public asset directory
pub const BLUEPRINT: Blueprint = Blueprint {
    directories: &[
        "src",
        "src/config",
        "src/database",
        "src/controllers",
        "src/views",
        "src/services",
        "public",
        "public/css",
    ],
    dependencies: &[
        "express",
        "express-ejs-layouts",
        "ejs",
        "dotenv",
        "dotenv-parse-variables",
    ],
    dev_dependencies: &[
        "@types/express",
        "@types/express-ejs-layouts",
        "@types/node",
        "@types/dotenv-parse-variables",
        "ts-node",
        "tsc-watch",
        "typescript",
    ],
};
