use libtest_mimic::{Arguments, Failed, Trial};
use polyset::{binary_op, parse_exact, Polygon, PolygonWithHoles, Rational};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug)]
enum FillRule {
    EvenOdd,
    NonZero,
}

#[derive(Serialize, Deserialize, Debug)]
enum BinaryOp {
    Union,
    Intersection,
    Difference,
    Xor,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Expectations {
    /// The number of polygons with holes in the output.
    components: Option<usize>,
    /// The total area of the output, as an exact number.
    area: Option<String>,
    /// The printed form of each output polygon with holes.
    printed: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug)]
struct RegressionCaseDeclaration {
    polygon_1: String,
    polygon_2: String,
    fill_rule: FillRule,
    op: BinaryOp,
    expect: Option<Expectations>,
}

impl RegressionCaseDeclaration {
    fn polyset_fill_rule(&self) -> polyset::FillRule {
        match self.fill_rule {
            FillRule::EvenOdd => polyset::FillRule::EvenOdd,
            FillRule::NonZero => polyset::FillRule::NonZero,
        }
    }

    fn polyset_binary_op(&self) -> polyset::BinaryOp {
        match self.op {
            BinaryOp::Union => polyset::BinaryOp::Union,
            BinaryOp::Intersection => polyset::BinaryOp::Intersection,
            BinaryOp::Difference => polyset::BinaryOp::Difference,
            BinaryOp::Xor => polyset::BinaryOp::Xor,
        }
    }
}

fn main() {
    let args = Arguments::from_args();
    let tests = regression_tests();

    libtest_mimic::run(&args, tests).exit();
}

fn regression_tests() -> Vec<Trial> {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let file_paths = glob::glob(&format!("{ws}/tests/regression/**/*.yml")).unwrap();

    file_paths
        .into_iter()
        .map(|p| {
            let p = p.unwrap();
            let name = input_path_base(&p).display().to_string();
            Trial::test(name, || run_regression_test(p))
        })
        .collect()
}

fn input_path_base(input_path: &Path) -> &Path {
    let ws = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let base = format!("{ws}/tests/regression");
    input_path.strip_prefix(base).unwrap()
}

fn run_regression_test(path: PathBuf) -> Result<(), Failed> {
    let input = std::fs::read_to_string(&path)?;
    let case: RegressionCaseDeclaration = serde_yaml::from_str(&input)?;
    let p0: Polygon = case.polygon_1.parse()?;
    let p1: Polygon = case.polygon_2.parse()?;
    let output = binary_op(
        [&p0],
        [&p1],
        case.polyset_fill_rule(),
        case.polyset_binary_op(),
    )
    .into_polygons_with_holes();

    check_expectations(&output, &case.expect.unwrap_or_default())
}

fn check_expectations(output: &[PolygonWithHoles], expect: &Expectations) -> Result<(), Failed> {
    if let Some(components) = expect.components {
        if output.len() != components {
            return Err(format!("expected {components} components, got {}", output.len()).into());
        }
    }

    if let Some(area) = &expect.area {
        let expected = parse_exact(area)?;
        let mut actual = Rational::from(0);
        for pwh in output {
            actual += pwh.area().ok_or("output is unbounded")?;
        }
        if actual != expected {
            return Err(format!("expected area {expected}, got {actual}").into());
        }
    }

    if let Some(printed) = &expect.printed {
        let actual: Vec<String> = output.iter().map(|pwh| pwh.to_string()).collect();
        if &actual != printed {
            return Err(format!("expected\n{}\ngot\n{}", printed.join("\n"), actual.join("\n")).into());
        }
    }

    Ok(())
}
