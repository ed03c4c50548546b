//! GraphQL API projects (Apollo Server on Express)

use super::Blueprint;

/// Apollo Server with one directory per GraphQL module
pub const BLUEPRINT: Blueprint = Blueprint {
    directories: &[
        "src",
        "src/database",
        "src/graphql",
        "src/graphql/modules",
        "src/graphql/modules/default",
        "src/config",
        "src/interfaces",
    ],
    dependencies: &[
        "@graphql-tools/schema",
        "apollo-server-express",
        "bcrypt",
        "cors",
        "dotenv",
        "dotenv-parse-variables",
        "express",
        "graphql",
        "lodash",
    ],
    dev_dependencies: &[
        "@types/bcrypt",
        "@types/express",
        "@types/lodash",
        "@types/node",
        "@types/dotenv-parse-variables",
        "ts-node",
        "tsc-watch",
        "typescript",
    ],
};
