use crate::config::{ExpressionInput, RunParameters};
use crate::error::Result;
use crate::input::ExpressionSource;
use crate::input::geo::GeoExpression;
use crate::input::simple::SimpleExpressionFile;
use crate::input::tcga::{TcgaExpression, read_subtype_samples};

pub fn run_stage1(params: &RunParameters) -> Result<Box<dyn ExpressionSource>> {
    let source: Box<dyn ExpressionSource> = match params.expression_input()? {
        ExpressionInput::Simple(path) => Box::new(SimpleExpressionFile::load(&path)?),
        ExpressionInput::Tcga {
            directory,
            study,
            subtypes,
        } => {
            let subset = if subtypes.is_empty() {
                None
            } else {
                Some(read_subtype_samples(&directory, &study, &subtypes)?)
            };
            Box::new(TcgaExpression::load(
                &directory.join(&study),
                subset.as_ref(),
                params.expression_stdev_threshold,
            )?)
        }
        ExpressionInput::Geo { platform, series } => {
            Box::new(GeoExpression::load(&platform, &series)?)
        }
    };
    Ok(source)
}
