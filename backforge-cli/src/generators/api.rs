//! REST API projects (Express)

use super::Blueprint;

/// Express REST API with a routes/services/middlewares layout
pub const BLUEPRINT: Blueprint = Blueprint {
    directories: &[
        "src",
        "src/config",
        "src/database",
        "src/middlewares",
        "src/routes",
        "src/services",
        "src/interfaces",
    ],
    dependencies: &["express", "cors", "dotenv", "dotenv-parse-variables", "lodash"],
    dev_dependencies: &[
        "@types/cors",
        "@types/express",
        "@types/lodash",
        "@types/node",
        "@types/dotenv-parse-variables",
        "ts-node",
        "tsc-watch",
        "typescript",
    ],
};
